// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Flow Name Service

//! Manage-domain view controller.
//!
//! Holds the per-view state behind the manage page: the resolved domain,
//! the edit inputs, the renewal duration and the displayed rent cost.
//!
//! Every action follows the same state machine, `idle -> submitting ->
//! idle`. The `loading` flag gates all actions while one is in flight, so
//! a view instance never issues two concurrent submissions — a UI-level
//! mutual exclusion only; the ledger still serializes or rejects
//! conflicting transactions on its own. Writes are an explicit two-step
//! protocol: submit, await seal, then re-fetch the domain so displayed
//! state is always ledger-consistent. No optimistic update is ever
//! committed.
//!
//! Failed actions clear the flag, leave prior displayed state unchanged,
//! and record a message for the view to render alongside the structured
//! log entry.

use std::sync::Arc;

use crate::chain::client::ChainError;
use crate::chain::types::TransactionId;
use crate::chain::{DomainScripts, DomainTransactions};
use crate::error::ActionError;
use crate::models::{DomainInfo, DurationSeconds, FlowAddress, NameHash};
use crate::session::SessionHandle;

pub use crate::models::SECONDS_PER_YEAR;

/// Per-view controller for one domain's manage page.
pub struct ManageDomain<R: DomainScripts + DomainTransactions> {
    session: SessionHandle,
    registry: Arc<R>,
    name_hash: NameHash,
    domain_info: Option<DomainInfo>,
    bio_input: String,
    address_input: String,
    renew_years: u32,
    loading: bool,
    cost: Option<f64>,
    last_error: Option<String>,
}

impl<R: DomainScripts + DomainTransactions> ManageDomain<R> {
    pub fn new(session: SessionHandle, registry: Arc<R>, name_hash: NameHash) -> Self {
        Self {
            session,
            registry,
            name_hash,
            domain_info: None,
            bio_input: String::new(),
            address_input: String::new(),
            renew_years: 1,
            loading: false,
            cost: None,
            last_error: None,
        }
    }

    // -- rendered state -------------------------------------------------

    pub fn domain_info(&self) -> Option<&DomainInfo> {
        self.domain_info.as_ref()
    }

    pub fn cost(&self) -> Option<f64> {
        self.cost
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // -- inputs ---------------------------------------------------------

    pub fn set_bio_input(&mut self, bio: impl Into<String>) {
        self.bio_input = bio.into();
    }

    pub fn set_address_input(&mut self, address: impl Into<String>) {
        self.address_input = address.into();
    }

    /// Change the requested renewal duration. Cost recomputes reactively.
    pub async fn set_renew_years(&mut self, years: u32) {
        self.renew_years = years;
        self.recompute_cost().await;
    }

    // -- actions --------------------------------------------------------

    /// Fetch the domain fresh from the ledger.
    ///
    /// A no-op while the wallet subsystem is still bootstrapping. On read
    /// failure the view renders blank: no stale fallback is kept.
    pub async fn load(&mut self) -> Result<(), ActionError> {
        if !self.session.is_initialized() {
            return Ok(());
        }
        self.refresh().await
    }

    /// Submit a bio update, await seal, re-fetch.
    pub async fn update_bio(&mut self) -> Result<(), ActionError> {
        if self.loading {
            return Ok(());
        }
        self.loading = true;

        let bio = self.bio_input.clone();
        let name_hash = self.name_hash.clone();
        let submitted = self.registry.update_bio(&name_hash, &bio).await;
        self.confirm_and_refresh(submitted).await
    }

    /// Submit a linked-address update, await seal, re-fetch.
    ///
    /// The input is validated as a Flow address before anything is
    /// submitted.
    pub async fn update_address(&mut self) -> Result<(), ActionError> {
        if self.loading {
            return Ok(());
        }

        let address = match FlowAddress::parse(&self.address_input) {
            Ok(addr) => addr,
            Err(e) => return self.fail(ActionError::from(e)),
        };

        self.loading = true;
        let name_hash = self.name_hash.clone();
        let submitted = self.registry.update_address(&name_hash, &address).await;
        self.confirm_and_refresh(submitted).await
    }

    /// Submit a renewal for the configured number of years, await seal,
    /// re-fetch.
    ///
    /// A non-positive duration is rejected here; the write wrapper is
    /// never invoked for it.
    pub async fn renew(&mut self) -> Result<(), ActionError> {
        if self.loading {
            return Ok(());
        }

        if self.renew_years == 0 {
            return self.fail(ActionError::Validation(
                "Must be renewing for at least one year".into(),
            ));
        }
        let name = match &self.domain_info {
            Some(info) => info.bare_name().to_string(),
            None => {
                return self.fail(ActionError::Validation("No domain loaded".into()));
            }
        };
        let duration = match DurationSeconds::from_years(self.renew_years) {
            Ok(d) => d,
            Err(e) => return self.fail(ActionError::from(e)),
        };

        self.loading = true;
        let submitted = self.registry.renew(&name, duration).await;
        self.confirm_and_refresh(submitted).await
    }

    /// Re-query the rent cost. Reactive only: runs on every change to the
    /// resolved domain or the renewal duration, never queries without a
    /// domain or with a non-positive duration, and touches nothing on the
    /// ledger.
    pub async fn recompute_cost(&mut self) {
        let name = match &self.domain_info {
            Some(info) => info.bare_name().to_string(),
            None => return,
        };
        if name.is_empty() || self.renew_years == 0 {
            return;
        }

        let duration = match DurationSeconds::from_years(self.renew_years) {
            Ok(d) => d,
            Err(_) => return,
        };

        let quoted = self.registry.rent_cost(&name, duration).await;
        match quoted {
            Ok(cost) => self.cost = Some(cost),
            Err(e) => {
                // Leave the previously displayed cost in place.
                tracing::warn!(error = %e, "Rent cost query failed");
            }
        }
    }

    // -- internals ------------------------------------------------------

    async fn refresh(&mut self) -> Result<(), ActionError> {
        let owner = match self.session.current_address() {
            Some(addr) => addr,
            None => return self.fail(ActionError::NotConnected),
        };

        let name_hash = self.name_hash.clone();
        let fetched = self
            .registry
            .domain_info_by_name_hash(&owner, &name_hash)
            .await;
        match fetched {
            Ok(info) => {
                self.domain_info = Some(info);
                self.last_error = None;
                self.recompute_cost().await;
                Ok(())
            }
            Err(e) => {
                self.domain_info = None;
                self.fail(ActionError::Read(e))
            }
        }
    }

    /// Second half of every write: await seal, re-fetch, clear the gate.
    async fn confirm_and_refresh(
        &mut self,
        submitted: Result<TransactionId, ChainError>,
    ) -> Result<(), ActionError> {
        let result = match submitted {
            Ok(id) => {
                let sealed = self.registry.wait_for_seal(&id).await;
                match sealed {
                    Ok(_) => self.refresh().await,
                    Err(e) => Err(ActionError::Write(e)),
                }
            }
            Err(e) => Err(ActionError::Write(e)),
        };

        self.loading = false;
        match result {
            Ok(()) => Ok(()),
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, error: ActionError) -> Result<(), ActionError> {
        tracing::error!(error = %error, name_hash = %self.name_hash, "Domain action failed");
        self.last_error = Some(error.to_string());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::chain::types::{SealStatus, TransactionTemplate};
    use crate::session::WalletAgent;

    const OWNER: &str = "0xf8d6e0586b0a20c7";

    fn name_hash() -> NameHash {
        NameHash::parse(&"a".repeat(64)).unwrap()
    }

    fn sample_info() -> DomainInfo {
        DomainInfo {
            id: 7,
            name: "alice.fns".into(),
            name_hash: name_hash(),
            owner: FlowAddress::parse(OWNER).unwrap(),
            created_at: 1_700_000_000,
            expires_at: 1_731_536_000,
            bio: Some("old bio".into()),
            address: None,
        }
    }

    #[derive(Default)]
    struct FakeState {
        info: Option<DomainInfo>,
        reads: usize,
        rent_queries: Vec<(String, u64)>,
        writes: Vec<String>,
        renewals: Vec<u64>,
        fail_writes: bool,
        fail_seal: bool,
    }

    struct FakeRegistry(Mutex<FakeState>);

    impl FakeRegistry {
        fn with_domain(info: DomainInfo) -> Arc<Self> {
            Arc::new(FakeRegistry(Mutex::new(FakeState {
                info: Some(info),
                ..FakeState::default()
            })))
        }

        fn empty() -> Arc<Self> {
            Arc::new(FakeRegistry(Mutex::new(FakeState::default())))
        }

        fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
            self.0.lock().unwrap()
        }
    }

    #[async_trait]
    impl DomainScripts for FakeRegistry {
        async fn domain_info_by_name_hash(
            &self,
            _owner: &FlowAddress,
            _name_hash: &NameHash,
        ) -> Result<DomainInfo, ChainError> {
            let mut state = self.state();
            state.reads += 1;
            state.info.clone().ok_or(ChainError::Rpc {
                status: 400,
                message: "Domain not found".into(),
            })
        }

        async fn rent_cost(
            &self,
            name: &str,
            duration: DurationSeconds,
        ) -> Result<f64, ChainError> {
            let mut state = self.state();
            state
                .rent_queries
                .push((name.to_string(), duration.as_secs()));
            Ok(duration.as_secs() as f64 / SECONDS_PER_YEAR as f64 * 3.5)
        }

        async fn all_domain_infos(&self) -> Result<Vec<DomainInfo>, ChainError> {
            Ok(self.state().info.clone().into_iter().collect())
        }

        async fn my_domain_infos(
            &self,
            _owner: &FlowAddress,
        ) -> Result<Vec<DomainInfo>, ChainError> {
            Ok(self.state().info.clone().into_iter().collect())
        }

        async fn is_available(&self, _name: &str) -> Result<bool, ChainError> {
            Ok(self.state().info.is_none())
        }
    }

    #[async_trait]
    impl DomainTransactions for FakeRegistry {
        async fn update_bio(
            &self,
            _name_hash: &NameHash,
            bio: &str,
        ) -> Result<TransactionId, ChainError> {
            let mut state = self.state();
            if state.fail_writes {
                return Err(ChainError::Wallet("signing declined".into()));
            }
            state.writes.push(format!("bio:{bio}"));
            if let Some(info) = state.info.as_mut() {
                info.bio = Some(bio.to_string());
            }
            Ok(TransactionId("tx-bio".into()))
        }

        async fn update_address(
            &self,
            _name_hash: &NameHash,
            address: &FlowAddress,
        ) -> Result<TransactionId, ChainError> {
            let mut state = self.state();
            if state.fail_writes {
                return Err(ChainError::Wallet("signing declined".into()));
            }
            state.writes.push(format!("address:{address}"));
            if let Some(info) = state.info.as_mut() {
                info.address = Some(address.to_string());
            }
            Ok(TransactionId("tx-addr".into()))
        }

        async fn renew(
            &self,
            _name: &str,
            duration: DurationSeconds,
        ) -> Result<TransactionId, ChainError> {
            let mut state = self.state();
            if state.fail_writes {
                return Err(ChainError::Wallet("signing declined".into()));
            }
            state.renewals.push(duration.as_secs());
            if let Some(info) = state.info.as_mut() {
                info.expires_at += duration.as_secs() as i64;
            }
            Ok(TransactionId("tx-renew".into()))
        }

        async fn register(
            &self,
            _name: &str,
            _duration: DurationSeconds,
        ) -> Result<TransactionId, ChainError> {
            Ok(TransactionId("tx-register".into()))
        }

        async fn init_account(&self) -> Result<TransactionId, ChainError> {
            Ok(TransactionId("tx-init".into()))
        }

        async fn wait_for_seal(&self, id: &TransactionId) -> Result<SealStatus, ChainError> {
            if self.state().fail_seal {
                return Err(ChainError::SealTimeout(id.clone()));
            }
            Ok(SealStatus::Sealed)
        }
    }

    struct StubWallet;

    #[async_trait]
    impl WalletAgent for StubWallet {
        fn address(&self) -> FlowAddress {
            FlowAddress::parse(OWNER).unwrap()
        }

        async fn sign_and_submit(
            &self,
            _template: &TransactionTemplate,
        ) -> Result<TransactionId, ChainError> {
            unreachable!("fake registry never reaches the wallet")
        }
    }

    fn connected_session() -> SessionHandle {
        SessionHandle::connected(Arc::new(StubWallet))
    }

    fn controller(registry: Arc<FakeRegistry>) -> ManageDomain<FakeRegistry> {
        ManageDomain::new(connected_session(), registry, name_hash())
    }

    #[tokio::test]
    async fn load_resolves_domain_with_suffix() {
        let registry = FakeRegistry::with_domain(sample_info());
        let mut view = controller(registry);

        view.load().await.unwrap();

        let info = view.domain_info().unwrap();
        assert!(info.name.ends_with(".fns"));
        assert_eq!(info.bare_name(), "alice");
        assert_eq!(view.last_error(), None);
    }

    #[tokio::test]
    async fn load_is_a_noop_before_wallet_bootstrap() {
        let registry = FakeRegistry::with_domain(sample_info());
        let mut view =
            ManageDomain::new(SessionHandle::uninitialized(), registry.clone(), name_hash());

        view.load().await.unwrap();

        assert_eq!(registry.state().reads, 0);
        assert!(view.domain_info().is_none());
    }

    #[tokio::test]
    async fn load_without_address_is_not_connected() {
        let registry = FakeRegistry::with_domain(sample_info());
        let mut view =
            ManageDomain::new(SessionHandle::disconnected(), registry.clone(), name_hash());

        let err = view.load().await.unwrap_err();
        assert!(matches!(err, ActionError::NotConnected));
        assert_eq!(registry.state().reads, 0);
    }

    #[tokio::test]
    async fn read_failure_renders_blank() {
        let registry = FakeRegistry::empty();
        let mut view = controller(registry);

        let err = view.load().await.unwrap_err();
        assert!(matches!(err, ActionError::Read(_)));
        assert!(view.domain_info().is_none());
        assert!(view.last_error().is_some());
    }

    #[tokio::test]
    async fn year_to_seconds_conversion() {
        assert_eq!(DurationSeconds::from_years(1).unwrap().as_secs(), 31_536_000);
        assert_eq!(DurationSeconds::from_years(2).unwrap().as_secs(), 63_072_000);

        let registry = FakeRegistry::with_domain(sample_info());
        let mut view = controller(registry.clone());
        view.load().await.unwrap();

        view.renew().await.unwrap();
        view.set_renew_years(2).await;
        view.renew().await.unwrap();

        assert_eq!(registry.state().renewals, vec![31_536_000, 63_072_000]);
    }

    #[tokio::test]
    async fn renew_zero_years_never_submits() {
        let registry = FakeRegistry::with_domain(sample_info());
        let mut view = controller(registry.clone());
        view.load().await.unwrap();

        view.set_renew_years(0).await;
        let err = view.renew().await.unwrap_err();

        assert!(matches!(err, ActionError::Validation(_)));
        assert!(registry.state().renewals.is_empty());
        assert!(!view.is_loading());
        assert!(view.last_error().unwrap().contains("at least one year"));
    }

    #[tokio::test]
    async fn bio_update_round_trip() {
        let registry = FakeRegistry::with_domain(sample_info());
        let mut view = controller(registry.clone());
        view.load().await.unwrap();

        view.set_bio_input("gm flow");
        view.update_bio().await.unwrap();

        // The re-fetch after seal reflects the new value; nothing was
        // committed optimistically.
        assert_eq!(view.domain_info().unwrap().bio.as_deref(), Some("gm flow"));
        assert_eq!(registry.state().writes, vec!["bio:gm flow"]);
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn address_update_validates_before_submitting() {
        let registry = FakeRegistry::with_domain(sample_info());
        let mut view = controller(registry.clone());
        view.load().await.unwrap();

        view.set_address_input("not-an-address");
        let err = view.update_address().await.unwrap_err();

        assert!(matches!(err, ActionError::Validation(_)));
        assert!(registry.state().writes.is_empty());

        view.set_address_input("0xF8D6E0586B0A20C7");
        view.update_address().await.unwrap();
        assert_eq!(
            view.domain_info().unwrap().address.as_deref(),
            Some("0xf8d6e0586b0a20c7")
        );
    }

    #[tokio::test]
    async fn loading_gate_blocks_repeat_submissions() {
        let registry = FakeRegistry::with_domain(sample_info());
        let mut view = controller(registry.clone());
        view.load().await.unwrap();
        view.set_bio_input("queued");

        view.loading = true;
        view.update_bio().await.unwrap();
        view.renew().await.unwrap();

        assert!(registry.state().writes.is_empty());
        assert!(registry.state().renewals.is_empty());
        assert!(view.is_loading());
    }

    #[tokio::test]
    async fn write_failure_clears_gate_and_keeps_state() {
        let registry = FakeRegistry::with_domain(sample_info());
        let mut view = controller(registry.clone());
        view.load().await.unwrap();

        registry.state().fail_writes = true;
        view.set_bio_input("will not stick");
        let err = view.update_bio().await.unwrap_err();

        assert!(matches!(err, ActionError::Write(_)));
        assert!(!view.is_loading());
        assert_eq!(view.domain_info().unwrap().bio.as_deref(), Some("old bio"));
        assert!(view.last_error().is_some());
    }

    #[tokio::test]
    async fn seal_failure_clears_gate_and_keeps_state() {
        let registry = FakeRegistry::with_domain(sample_info());
        let mut view = controller(registry.clone());
        view.load().await.unwrap();
        let shown_expiry = view.domain_info().unwrap().expires_at;

        registry.state().fail_seal = true;
        view.set_bio_input("never sealed");
        let err = view.update_bio().await.unwrap_err();

        // Submission went out, but without a seal its effect is never
        // treated as durable: no re-fetch, displayed state untouched.
        assert!(matches!(
            err,
            ActionError::Write(ChainError::SealTimeout(_))
        ));
        assert!(!view.is_loading());
        assert_eq!(registry.state().writes, vec!["bio:never sealed"]);
        assert_eq!(view.domain_info().unwrap().bio.as_deref(), Some("old bio"));
        assert!(view.last_error().is_some());

        let err = view.renew().await.unwrap_err();
        assert!(matches!(err, ActionError::Write(_)));
        assert!(!view.is_loading());
        assert_eq!(registry.state().renewals, vec![31_536_000]);
        assert_eq!(view.domain_info().unwrap().expires_at, shown_expiry);
    }

    #[tokio::test]
    async fn cost_recomputes_on_domain_and_duration_changes() {
        let registry = FakeRegistry::with_domain(sample_info());
        let mut view = controller(registry.clone());

        // No domain resolved yet: no query.
        view.recompute_cost().await;
        assert!(registry.state().rent_queries.is_empty());

        view.load().await.unwrap();
        assert_eq!(
            registry.state().rent_queries,
            vec![("alice".to_string(), 31_536_000)]
        );
        assert_eq!(view.cost(), Some(3.5));

        view.set_renew_years(2).await;
        assert_eq!(registry.state().rent_queries.len(), 2);
        assert_eq!(
            registry.state().rent_queries[1],
            ("alice".to_string(), 63_072_000)
        );
        assert_eq!(view.cost(), Some(7.0));

        // Non-positive duration: no query, prior cost stays displayed.
        view.set_renew_years(0).await;
        assert_eq!(registry.state().rent_queries.len(), 2);
        assert_eq!(view.cost(), Some(7.0));
    }
}
