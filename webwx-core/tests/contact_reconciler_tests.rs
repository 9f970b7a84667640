//! Tests for contact::reconciler
//! Extracted from reconciler.rs

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use proptest::prelude::*;
use webwx_core::contact::*;
use webwx_core::message::Message;
use webwx_core::sync::ChangeBatch;
use webwx_core::{WebWxError, WebWxResult};

/// Fetcher that records each chunk and answers from a script.
#[derive(Default)]
struct RecordingFetcher {
    chunks: Mutex<Vec<Vec<String>>>,
    failures: Mutex<Vec<Option<WebWxError>>>,
}

impl RecordingFetcher {
    fn failing_with(failures: Vec<Option<WebWxError>>) -> Self {
        RecordingFetcher {
            chunks: Mutex::new(Vec::new()),
            failures: Mutex::new(failures),
        }
    }

    fn chunks(&self) -> Vec<Vec<String>> {
        self.chunks.lock().clone()
    }
}

#[async_trait]
impl ProfileFetcher for RecordingFetcher {
    async fn fetch_profiles(&self, identities: &[String]) -> WebWxResult<Vec<Contact>> {
        self.chunks.lock().push(identities.to_vec());
        let scripted = {
            let mut failures = self.failures.lock();
            if failures.is_empty() {
                None
            } else {
                failures.remove(0)
            }
        };
        match scripted {
            Some(err) => Err(err),
            None => Ok(identities
                .iter()
                .map(|id| Contact {
                    user_name: id.clone(),
                    nick_name: format!("nick {}", id),
                    member_count: if is_group_identity(id) { 3 } else { 0 },
                    ..Default::default()
                })
                .collect()),
        }
    }
}

fn message_from(sender: &str) -> Message {
    Message {
        msg_id: "1".into(),
        from_user_name: sender.into(),
        to_user_name: "@self".into(),
        msg_type: 1,
        content: "hi".into(),
        ..Default::default()
    }
}

fn status_notify(targets: &[String]) -> Message {
    Message {
        msg_id: "2".into(),
        from_user_name: "@self".into(),
        to_user_name: "@self".into(),
        msg_type: 51,
        status_notify_user_name: targets.join(","),
        ..Default::default()
    }
}

fn reconciler() -> (ContactReconciler, Arc<ContactDirectory>) {
    let directory = Arc::new(ContactDirectory::new());
    directory.upsert(Contact::with_identity("@self"));
    (ContactReconciler::new(Arc::clone(&directory)), directory)
}

fn unique_identities(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("@{:08x}", i)).collect()
}

// ============================================================
// Candidates
// ============================================================

#[test]
fn test_candidates_include_unknown_senders_only() {
    let (reconciler, directory) = reconciler();
    directory.upsert(Contact::with_identity("@known"));

    let batch = ChangeBatch {
        added_messages: vec![message_from("@known"), message_from("@stranger")],
        ..Default::default()
    };

    assert_eq!(reconciler.candidates(&batch), vec!["@stranger".to_string()]);
}

#[test]
fn test_candidates_include_groups_without_members() {
    let (reconciler, directory) = reconciler();
    directory.upsert(Contact::with_identity("@@stale"));
    directory.upsert(Contact {
        user_name: "@@fresh".into(),
        member_count: 12,
        ..Default::default()
    });
    directory.upsert(Contact::with_identity("@user-without-members"));

    let batch = ChangeBatch {
        added_messages: vec![
            message_from("@@stale"),
            message_from("@@fresh"),
            message_from("@user-without-members"),
        ],
        ..Default::default()
    };

    assert_eq!(reconciler.candidates(&batch), vec!["@@stale".to_string()]);
}

#[test]
fn test_candidates_include_status_notify_targets_and_dedup() {
    let (reconciler, _) = reconciler();
    let mut notify = status_notify(&["@a".into(), "@b".into()]);
    notify.status_notify_user_name = "@a, ,@b,,@a".into();

    let batch = ChangeBatch {
        added_messages: vec![notify, message_from("@b"), message_from("@c"), message_from("")],
        ..Default::default()
    };

    assert_eq!(
        reconciler.candidates(&batch),
        vec!["@a".to_string(), "@b".to_string(), "@c".to_string()]
    );
}

// ============================================================
// Chunking
// ============================================================

#[test]
fn test_chunk_identities_exact_multiple() {
    let ids = unique_identities(80);
    let chunks = chunk_identities(&ids, BATCH_FETCH_LIMIT);
    assert_eq!(chunks.len(), 2);
    assert!(chunks.iter().all(|c| c.len() == 40));
}

#[test]
fn test_chunk_identities_empty() {
    assert!(chunk_identities(&[], BATCH_FETCH_LIMIT).is_empty());
}

proptest! {
    #[test]
    fn test_reconcile_chunks_candidates(n in 0usize..200) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let (reconciler, directory) = reconciler();
        let ids = unique_identities(n);
        let batch = ChangeBatch {
            added_messages: vec![status_notify(&ids)],
            ..Default::default()
        };
        let fetcher = RecordingFetcher::default();

        let report = runtime.block_on(reconciler.reconcile(&fetcher, &batch)).unwrap();
        let chunks = fetcher.chunks();

        prop_assert_eq!(chunks.len(), n.div_ceil(40));
        if let Some(last) = chunks.last() {
            let expected_last = if n % 40 == 0 { 40 } else { n % 40 };
            prop_assert_eq!(last.len(), expected_last);
        }
        prop_assert!(chunks.iter().all(|c| c.len() <= BATCH_FETCH_LIMIT));
        let flattened: Vec<String> = chunks.into_iter().flatten().collect();
        prop_assert_eq!(&flattened, &ids);
        prop_assert_eq!(report.requested, n);
        prop_assert_eq!(report.fetched, n);
        prop_assert_eq!(directory.len(), n + 1);
    }
}

// ============================================================
// Failure handling
// ============================================================

#[tokio::test]
async fn test_empty_result_is_swallowed() {
    let (reconciler, directory) = reconciler();
    let ids = unique_identities(90);
    let batch = ChangeBatch {
        added_messages: vec![status_notify(&ids)],
        modified_contacts: vec![Contact::with_identity("@mod")],
        ..Default::default()
    };
    let fetcher = RecordingFetcher::failing_with(vec![None, Some(WebWxError::ContactListEmpty)]);

    let report = reconciler.reconcile(&fetcher, &batch).await.unwrap();

    assert_eq!(fetcher.chunks().len(), 3);
    assert_eq!(report.fetched, 40 + 10);
    assert_eq!(report.modified, 1);
    assert!(directory.contains("@mod"));
    assert!(directory.contains(&ids[0]));
    assert!(!directory.contains(&ids[40]));
    assert!(directory.contains(&ids[80]));
}

#[tokio::test]
async fn test_other_error_aborts_remaining_chunks() {
    let (reconciler, directory) = reconciler();
    let ids = unique_identities(120);
    let batch = ChangeBatch {
        added_messages: vec![status_notify(&ids)],
        modified_contacts: vec![Contact::with_identity("@mod")],
        deleted_contacts: vec![Contact::with_identity("@self")],
        ..Default::default()
    };
    let fetcher = RecordingFetcher::failing_with(vec![
        None,
        Some(WebWxError::Provider { code: 1 }),
    ]);

    let err = reconciler.reconcile(&fetcher, &batch).await.unwrap_err();

    assert_eq!(err, WebWxError::Provider { code: 1 });
    assert_eq!(fetcher.chunks().len(), 2);
    // The first chunk stays applied; explicit changes were not reached.
    assert!(directory.contains(&ids[0]));
    assert!(!directory.contains(&ids[40]));
    assert!(!directory.contains("@mod"));
    assert!(directory.contains("@self"));
}

// ============================================================
// Explicit changes
// ============================================================

#[tokio::test]
async fn test_modified_then_deleted_are_applied() {
    let (reconciler, directory) = reconciler();
    directory.upsert(Contact {
        user_name: "@friend".into(),
        nick_name: "Old".into(),
        ..Default::default()
    });
    directory.upsert(Contact::with_identity("@gone"));

    let batch = ChangeBatch {
        modified_contacts: vec![Contact {
            user_name: "@friend".into(),
            nick_name: "New".into(),
            ..Default::default()
        }],
        deleted_contacts: vec![Contact::with_identity("@gone")],
        ..Default::default()
    };
    let fetcher = RecordingFetcher::default();

    let report = reconciler.reconcile(&fetcher, &batch).await.unwrap();

    assert_eq!(report.modified, 1);
    assert_eq!(report.deleted, 1);
    assert!(fetcher.chunks().is_empty());
    assert_eq!(directory.get("@friend").unwrap().nick_name, "New");
    assert!(!directory.contains("@gone"));
}

#[tokio::test]
async fn test_reconciliation_is_idempotent() {
    let (reconciler, directory) = reconciler();
    directory.upsert(Contact::with_identity("@gone"));

    let batch = ChangeBatch {
        added_messages: vec![message_from("@new"), message_from("@@room")],
        modified_contacts: vec![Contact {
            user_name: "@friend".into(),
            nick_name: "Friend".into(),
            ..Default::default()
        }],
        deleted_contacts: vec![Contact::with_identity("@gone")],
        ..Default::default()
    };
    let fetcher = RecordingFetcher::default();

    reconciler.reconcile(&fetcher, &batch).await.unwrap();
    let once = directory.snapshot();

    reconciler.reconcile(&fetcher, &batch).await.unwrap();
    let twice = directory.snapshot();

    assert_eq!(once, twice);
    assert!(twice.contains_key("@new"));
    assert!(twice.contains_key("@@room"));
    assert!(!twice.contains_key("@gone"));
}
