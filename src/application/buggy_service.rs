//! Buggy use cases
//!
//! Orchestrates validation, pricing and persistence for the single buggy.
//! The catalog is loaded fresh for every submission.

use anyhow::{anyhow, Result};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::buggy::{BuggyRecord, BuggySpec};
use crate::domain::cost_catalog::{CatalogUnavailable, CostCatalog};
use crate::domain::pricing;
use crate::domain::repositories::BuggyRepository;
use crate::domain::services::CatalogSource;
use crate::domain::validation::{BuggyForm, Violation};

/// Result of submitting the buggy form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The buggy was priced and stored
    Saved { total_cost: u32 },
    /// The submission broke a rule; nothing was stored
    Rejected(Violation),
    /// The store failed
    Failed(String),
}

#[derive(Clone)]
pub struct BuggyService {
    buggies: Arc<dyn BuggyRepository>,
    catalog: Arc<dyn CatalogSource>,
}

impl BuggyService {
    pub fn new(buggies: Arc<dyn BuggyRepository>, catalog: Arc<dyn CatalogSource>) -> Self {
        Self { buggies, catalog }
    }

    /// The stored buggy; a missing row is an error since migration seeds it
    pub async fn current_buggy(&self) -> Result<BuggyRecord> {
        self.buggies
            .find_default()
            .await?
            .ok_or_else(|| anyhow!("The default buggy row is missing"))
    }

    /// Fresh cost catalog from the race server
    pub async fn cost_catalog(&self) -> Result<CostCatalog, CatalogUnavailable> {
        self.catalog.load_catalog().await
    }

    /// Validate the form, then price the result
    pub async fn price(&self, form: &BuggyForm) -> Result<(BuggySpec, u32), Violation> {
        let spec = form.validate()?;
        let catalog = self
            .cost_catalog()
            .await
            .map_err(Violation::PricingUnavailable)?;
        let total_cost = pricing::total_cost(&catalog, &spec)?;
        Ok((spec, total_cost))
    }

    /// Validate, price and store a form submission
    pub async fn submit(&self, form: &BuggyForm) -> SubmissionOutcome {
        let (spec, total_cost) = match self.price(form).await {
            Ok(priced) => priced,
            Err(violation) => {
                info!("Buggy submission rejected: {}", violation);
                return SubmissionOutcome::Rejected(violation);
            }
        };

        match self.buggies.update_default(&spec, total_cost).await {
            Ok(0) => {
                warn!("Buggy update matched no rows");
                SubmissionOutcome::Failed("the buggy record does not exist".to_string())
            }
            Ok(_) => {
                info!("Buggy saved with total cost {}", total_cost);
                SubmissionOutcome::Saved { total_cost }
            }
            Err(e) => {
                error!("Buggy update failed: {:#}", e);
                SubmissionOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cost_catalog::CostEntry;
    use crate::domain::pricing::{ComponentField, PricingError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryRepository {
        row: Mutex<Option<BuggyRecord>>,
        fail: bool,
    }

    #[async_trait]
    impl BuggyRepository for MemoryRepository {
        async fn find_default(&self) -> Result<Option<BuggyRecord>> {
            Ok(self.row.lock().unwrap().clone())
        }

        async fn update_default(&self, spec: &BuggySpec, total_cost: u32) -> Result<u64> {
            if self.fail {
                return Err(anyhow!("disk full"));
            }
            let mut row = self.row.lock().unwrap();
            match row.as_mut() {
                Some(record) => {
                    record.spec = spec.clone();
                    record.total_cost = total_cost;
                    Ok(1)
                }
                None => Ok(0),
            }
        }
    }

    struct FixedCatalog(Result<CostCatalog, CatalogUnavailable>);

    #[async_trait]
    impl CatalogSource for FixedCatalog {
        async fn load_catalog(&self) -> Result<CostCatalog, CatalogUnavailable> {
            self.0.clone()
        }
    }

    fn catalog() -> CostCatalog {
        vec![
            CostEntry::new("none", 0),
            CostEntry::new("petrol", 4),
            CostEntry::new("knobbly", 15),
        ]
        .into_iter()
        .collect()
    }

    fn service(repo: MemoryRepository, catalog: Result<CostCatalog, CatalogUnavailable>) -> (BuggyService, Arc<MemoryRepository>) {
        let repo = Arc::new(repo);
        (BuggyService::new(repo.clone(), Arc::new(FixedCatalog(catalog))), repo)
    }

    fn seeded() -> MemoryRepository {
        MemoryRepository {
            row: Mutex::new(Some(BuggyRecord::default())),
            fail: false,
        }
    }

    fn form() -> BuggyForm {
        BuggyForm {
            qty_wheels: "4".to_string(),
            power_type: "petrol".to_string(),
            power_units: "2".to_string(),
            qty_tyres: "5".to_string(),
            tyres: "knobbly".to_string(),
            flag_color: "red".to_string(),
            flag_color_secondary: "red".to_string(),
            flag_pattern: "plain".to_string(),
            armour: "none".to_string(),
            attack: "none".to_string(),
        }
    }

    #[tokio::test]
    async fn saves_priced_buggy() {
        let (service, repo) = service(seeded(), Ok(catalog()));

        let outcome = service.submit(&form()).await;

        // 0 + 0 + 2 * 4 + 5 * 15
        assert_eq!(outcome, SubmissionOutcome::Saved { total_cost: 83 });
        let stored = repo.row.lock().unwrap().clone().unwrap();
        assert_eq!(stored.total_cost, 83);
        assert_eq!(stored.spec.qty_tyres, 5);
    }

    #[tokio::test]
    async fn unavailable_catalog_rejects_instead_of_pricing_zero() {
        let unavailable = CatalogUnavailable::Status {
            status: 503,
            url: "http://race/specs".to_string(),
        };
        let (service, repo) = service(seeded(), Err(unavailable.clone()));

        let outcome = service.submit(&form()).await;

        assert_eq!(outcome, SubmissionOutcome::Rejected(Violation::PricingUnavailable(unavailable)));
        assert_eq!(repo.row.lock().unwrap().clone().unwrap(), BuggyRecord::default());
    }

    #[tokio::test]
    async fn empty_catalog_reports_unknown_component() {
        let (service, _) = service(seeded(), Ok(CostCatalog::new()));

        let outcome = service.submit(&form()).await;

        assert_eq!(
            outcome,
            SubmissionOutcome::Rejected(Violation::Pricing(PricingError::UnknownComponent {
                field: ComponentField::Armour,
                item: "none".to_string(),
            }))
        );
    }

    #[tokio::test]
    async fn validation_runs_before_catalog() {
        let (service, _) = service(
            seeded(),
            Err(CatalogUnavailable::Transport {
                url: "x".to_string(),
                reason: "down".to_string(),
            }),
        );
        let form = BuggyForm {
            qty_wheels: "5".to_string(),
            ..form()
        };

        assert_eq!(service.submit(&form).await, SubmissionOutcome::Rejected(Violation::WheelsNotEven));
    }

    #[tokio::test]
    async fn store_failure_is_reported() {
        let (service, _) = service(
            MemoryRepository {
                fail: true,
                ..seeded()
            },
            Ok(catalog()),
        );

        assert_eq!(service.submit(&form()).await, SubmissionOutcome::Failed("disk full".to_string()));
    }

    #[tokio::test]
    async fn missing_row_is_reported() {
        let (service, _) = service(MemoryRepository::default(), Ok(catalog()));

        assert!(service.current_buggy().await.is_err());
        assert!(matches!(service.submit(&form()).await, SubmissionOutcome::Failed(_)));
    }
}
