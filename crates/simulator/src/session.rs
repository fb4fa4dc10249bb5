//! Visitor-side simulator state.

use purific_catalog::{Catalog, Purifier, Refill};
use purific_core::ItemId;

use crate::calculator::{ConsumptionProfile, Projection, simulate};

/// Jugs a typical household buys per week.
pub const DEFAULT_JUGS_PER_WEEK: f64 = 2.0;

/// Typical jug price in BRL.
pub const DEFAULT_JUG_PRICE: f64 = 12.0;

/// Inputs of one simulator screen.
///
/// The selection stores ids only; the catalog is read at projection time so
/// edits made in the meantime are always reflected.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorSession {
    profile: ConsumptionProfile,
    purifier_id: Option<ItemId>,
    refill_id: Option<ItemId>,
}

impl SimulatorSession {
    /// Start with default consumption and the first purifier and refill.
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            profile: ConsumptionProfile::new(DEFAULT_JUGS_PER_WEEK, DEFAULT_JUG_PRICE),
            purifier_id: catalog.purifiers().first().map(|p| p.id.clone()),
            refill_id: catalog.refills().first().map(|r| r.id.clone()),
        }
    }

    pub fn profile(&self) -> &ConsumptionProfile {
        &self.profile
    }

    pub fn set_jugs_per_week(&mut self, jugs_per_week: f64) {
        self.profile.jugs_per_week = jugs_per_week;
    }

    pub fn set_jug_price(&mut self, jug_price: f64) {
        self.profile.jug_price = jug_price;
    }

    pub fn select_purifier(&mut self, id: ItemId) {
        self.purifier_id = Some(id);
    }

    pub fn select_refill(&mut self, id: ItemId) {
        self.refill_id = Some(id);
    }

    pub fn selected_purifier<'a>(&self, catalog: &'a Catalog) -> Option<&'a Purifier> {
        self.purifier_id.as_ref().and_then(|id| catalog.purifier(id))
    }

    pub fn selected_refill<'a>(&self, catalog: &'a Catalog) -> Option<&'a Refill> {
        self.refill_id.as_ref().and_then(|id| catalog.refill(id))
    }

    /// Recompute from scratch. A selection that no longer resolves yields
    /// no result.
    pub fn projection(&self, catalog: &Catalog) -> Option<Projection> {
        let projection = simulate(
            &self.profile,
            self.selected_purifier(catalog),
            self.selected_refill(catalog),
        );
        if projection.is_none() {
            tracing::debug!(
                purifier = ?self.purifier_id,
                refill = ?self.refill_id,
                "no projection: selection incomplete"
            );
        }
        projection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_items() {
        let catalog = Catalog::seed();
        let session = SimulatorSession::new(&catalog);

        assert_eq!(session.profile().jugs_per_week, 2.0);
        assert_eq!(session.profile().jug_price, 12.0);
        assert_eq!(session.selected_purifier(&catalog).unwrap().id.as_str(), "1");
        assert_eq!(session.selected_refill(&catalog).unwrap().id.as_str(), "1");
    }

    #[test]
    fn seed_defaults_project_the_reference_scenario() {
        let catalog = Catalog::seed();
        let out = SimulatorSession::new(&catalog).projection(&catalog).unwrap();

        assert!((out.savings_1y - 671.36).abs() < 1e-6);
        assert!((out.savings_5y - 4636.80).abs() < 1e-6);
    }

    #[test]
    fn empty_catalog_has_no_projection() {
        let catalog = Catalog::new(Vec::new(), Catalog::seed().refills().to_vec());
        let session = SimulatorSession::new(&catalog);
        assert!(session.projection(&catalog).is_none());
    }

    #[test]
    fn stale_selection_has_no_projection() {
        let catalog = Catalog::seed();
        let mut session = SimulatorSession::new(&catalog);
        session.select_refill(ItemId::from("deleted"));
        assert!(session.projection(&catalog).is_none());
    }

    #[test]
    fn changing_inputs_recomputes() {
        let catalog = Catalog::seed();
        let mut session = SimulatorSession::new(&catalog);
        session.select_purifier(ItemId::from("2"));
        session.select_refill(ItemId::from("2"));
        session.set_jugs_per_week(3.0);
        session.set_jug_price(10.0);

        let out = session.projection(&catalog).unwrap();
        assert!((out.jug_cost_1y - 30.0 * 52.14).abs() < 1e-9);
        assert!((out.purifier_cost_1y - (290.0 + 85.0)).abs() < 1e-9);
        assert!((out.purifier_cost_5y - (290.0 + 9.0 * 85.0)).abs() < 1e-9);
    }
}
