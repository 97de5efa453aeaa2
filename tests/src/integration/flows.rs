//! # Integration Test Flows
//!
//! Validation, admission and expiry wired together through the node's
//! service container.
//!
//! ## Flows Tested:
//!
//! 1. **Submit → Admit → Siblings**: last-writer-wins across resubmissions
//! 2. **Chain tampering**: every broken link is rejected before the store
//! 3. **Concurrency**: at most one live record per pair under contention
//! 4. **Expiry**: the sweeper removes records past retention

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use node_runtime::container::{NodeConfig, ServiceContainer};
    use rd_01_entry_validation::test_utils::{EntrySigner, FixedTimeSource};
    use rd_01_entry_validation::{EntryKey, ValidationError};
    use rd_03_directory_api::DirectoryError;
    use shared_crypto::{Ed25519KeyPair, VerifyError};

    const T: u64 = 1_700_000_000_000;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn node() -> (ServiceContainer, Arc<FixedTimeSource>) {
        let clock = Arc::new(FixedTimeSource::new(T));
        let container = ServiceContainer::with_clock(NodeConfig::default(), clock.clone())
            .expect("in-memory container");
        (container, clock)
    }

    fn authority(seed: u8) -> EntrySigner {
        EntrySigner::new(Ed25519KeyPair::from_seed([seed; 32]))
    }

    async fn live_count(node: &ServiceContainer, signer: &EntrySigner) -> usize {
        node.store
            .list_siblings(&signer.authority_key(), "")
            .await
            .unwrap()
            .len()
    }

    // =============================================================================
    // SUBMIT → ADMIT → SIBLINGS
    // =============================================================================

    #[tokio::test]
    async fn test_resubmission_lifecycle() {
        let (node, clock) = node();
        let k = authority(1);

        let first = k.entry("M", "v1", "hello", T);
        assert!(node.directory.submit(first).await.unwrap().is_empty());

        let stale = k.entry("M", "v1", "hello", T - 1);
        assert!(matches!(
            node.directory.submit(stale).await,
            Err(DirectoryError::Conflict)
        ));

        clock.set(T + 1000);
        let newer = k.entry("M", "v2", "hello again", T + 1000);
        assert!(node.directory.submit(newer.clone()).await.unwrap().is_empty());

        let other = k.entry("N", "v1", "peer", T + 1000);
        let siblings = node.directory.submit(other).await.unwrap();
        assert_eq!(siblings, vec![newer.into_sibling()]);
        assert_eq!(live_count(&node, &k).await, 2);
    }

    #[tokio::test]
    async fn test_authorities_do_not_see_each_other() {
        let (node, _) = node();
        let a = authority(1);
        let b = authority(2);

        node.directory.submit(a.entry("shared", "v1", "a", T)).await.unwrap();
        let siblings = node
            .directory
            .submit(b.entry("other", "v1", "b", T))
            .await
            .unwrap();

        assert!(siblings.is_empty());
        assert_eq!(live_count(&node, &a).await, 1);
        assert_eq!(live_count(&node, &b).await, 1);
    }

    // =============================================================================
    // CHAIN TAMPERING
    // =============================================================================

    #[tokio::test]
    async fn test_tampered_entries_never_reach_the_store() {
        let (node, _) = node();
        let k = authority(1);
        let intruder = authority(9);
        let good = k.entry("M", "v1", "data", T);

        let mut metadata = good.clone();
        metadata.member.metadata = "v1-forged".into();

        let mut member_key = good.clone();
        member_key.member.key = "M2".into();

        let mut data = good.clone();
        data.body.data = "forged".into();

        let mut timestamp = good.clone();
        timestamp.body.timestamp = T - 1;

        let mut foreign_authority = good.clone();
        foreign_authority.authority_key = intruder.authority_key();

        // a body signed for another member identity
        let mut spliced = good.clone();
        spliced.body = k.entry("X", "v1", "data", T).body;

        let cases = [
            (metadata, "member"),
            (member_key, "member"),
            (data, "body"),
            (timestamp, "body"),
            (foreign_authority, "member"),
            (spliced, "body"),
        ];

        for (entry, link) in cases {
            let err = node.directory.submit(entry).await.unwrap_err();
            match (link, err) {
                ("member", DirectoryError::Invalid(ValidationError::MemberSignature(e)))
                | ("body", DirectoryError::Invalid(ValidationError::BodySignature(e))) => {
                    assert_eq!(e, VerifyError::Mismatch);
                }
                (link, other) => panic!("expected {} link failure, got {:?}", link, other),
            }
        }

        assert_eq!(live_count(&node, &k).await, 0);
        assert_eq!(live_count(&node, &intruder).await, 0);
    }

    #[tokio::test]
    async fn test_stale_and_future_timestamps_rejected() {
        let (node, _) = node();
        let k = authority(1);

        for ts in [T - 5001, T + 1, 0] {
            assert!(matches!(
                node.directory.submit(k.entry("M", "v1", "x", ts)).await,
                Err(DirectoryError::Invalid(ValidationError::InvalidTimestamp))
            ));
        }
        node.directory
            .submit(k.entry("M", "v1", "x", T - 5000))
            .await
            .unwrap();
    }

    // =============================================================================
    // CONCURRENCY
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submissions_for_one_pair_leave_one_record() {
        let (node, _) = node();
        let node = Arc::new(node);
        let k = Arc::new(authority(1));

        let handles: Vec<_> = (0..32u64)
            .map(|i| {
                let node = Arc::clone(&node);
                let k = Arc::clone(&k);
                tokio::spawn(async move {
                    let entry = k.entry("M", "v1", &format!("update {}", i), T - 1000 + i);
                    node.directory.submit(entry).await
                })
            })
            .collect();

        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) | Err(DirectoryError::Conflict) => {}
                Err(other) => panic!("unexpected failure: {:?}", other),
            }
        }

        assert_eq!(live_count(&node, &k).await, 1);
        let key = EntryKey::new(k.authority_key(), "M");
        let siblings = node.store.list_siblings(&key.authority_key, "").await.unwrap();
        assert_eq!(siblings[0].member.key, key.member_key);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_members_are_all_admitted() {
        let (node, _) = node();
        let node = Arc::new(node);
        let k = Arc::new(authority(1));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let node = Arc::clone(&node);
                let k = Arc::clone(&k);
                tokio::spawn(async move {
                    let entry = k.entry(&format!("member-{:02}", i), "v1", "x", T);
                    node.directory.submit(entry).await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let siblings = node
            .store
            .list_siblings(&k.authority_key(), "member-00")
            .await
            .unwrap();
        assert_eq!(siblings.len(), 15);
        assert!(siblings
            .windows(2)
            .all(|pair| pair[0].member.key < pair[1].member.key));
    }

    // =============================================================================
    // EXPIRY
    // =============================================================================

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_expires_idle_members() {
        let mut config = NodeConfig::default();
        config.expiry.interval = Duration::from_secs(10);
        let clock = Arc::new(FixedTimeSource::new(T));
        let node = ServiceContainer::with_clock(config, clock.clone()).unwrap();
        let k = authority(1);

        node.directory.submit(k.entry("idle", "v1", "x", T)).await.unwrap();

        let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
        let handle = tokio::spawn(node.sweeper().run(shutdown_rx));

        // a member that keeps refreshing survives past the idle one
        clock.set(T + 20 * 60_000);
        node.directory
            .submit(k.entry("active", "v1", "x", T + 20 * 60_000))
            .await
            .unwrap();

        clock.set(T + 30 * 60_000 + 1);
        tokio::time::sleep(Duration::from_secs(11)).await;

        let remaining = node.store.list_siblings(&k.authority_key(), "").await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].member.key, "active");

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
