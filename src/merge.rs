//! The incremental merge engine.
//!
//! Given a filtered source table, an optional previously produced output for
//! one target language, and a translation provider, build the final output
//! table for that language. The source table is authoritative for key set and
//! ordering; existing translations are reused verbatim; only keys with no
//! prior translation cost a provider call.
//!
//! Re-running a completed merge with its own output as `existing` reproduces
//! it exactly with zero provider calls, which is what makes re-runs cheap.

use crate::i18n::Language;
use crate::provider::{TranslateError, Translator};
use crate::resource::ResourceTable;

/// A completed merge for one language.
#[derive(Debug)]
pub struct MergeOutcome {
    /// The assembled output table, in the filtered source's order
    pub table: ResourceTable,

    /// Keys whose prior translation was carried over unchanged
    pub reused: usize,

    /// Keys newly resolved this run (translated, or copied for the native
    /// language)
    pub added: usize,
}

/// Merge `source` with `existing` into a fresh output table for `target`.
///
/// `source` must already be the translatable working set (see
/// [`ResourceTable::filter_translatable`]). Keys present only in `existing`
/// are pruned; an empty source yields an empty outcome.
///
/// Any provider failure aborts the whole merge: no partially translated
/// table is ever returned.
pub async fn merge<T: Translator>(
    source: &ResourceTable,
    existing: Option<&ResourceTable>,
    target: &Language,
    translator: &T,
) -> Result<MergeOutcome, TranslateError> {
    let mut table = ResourceTable::new();
    let mut reused = 0;
    let mut added = 0;

    for entry in source.iter() {
        if let Some(prior) = existing.and_then(|t| t.get(&entry.key)) {
            // Incremental-reuse rule: a prior translation is never refreshed,
            // even if the source value has since changed. Forcing a
            // re-translation requires deleting the key or the output file.
            table.insert(entry.key.clone(), prior.to_string());
            reused += 1;
        } else if target.is_native() {
            table.insert(entry.key.clone(), entry.value.clone());
            added += 1;
        } else {
            let translated = translator.translate(&entry.value, target.code()).await?;
            table.insert(entry.key.clone(), translated);
            added += 1;
        }
    }

    Ok(MergeOutcome {
        table,
        reused,
        added,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Test provider with a fixed text -> translation mapping and a call
    /// counter. Unmapped inputs get a deterministic synthetic translation.
    struct ScriptedTranslator {
        map: HashMap<String, String>,
        calls: AtomicUsize,
        fail: bool,
    }

    impl ScriptedTranslator {
        fn new(pairs: &[(&str, &str)]) -> Self {
            Self {
                map: pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                map: HashMap::new(),
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Translator for ScriptedTranslator {
        async fn translate(
            &self,
            text: &str,
            target_code: &str,
        ) -> Result<String, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(TranslateError::Response("scripted failure".to_string()));
            }
            Ok(self
                .map
                .get(text)
                .cloned()
                .unwrap_or_else(|| format!("{}[{}]", text, target_code)))
        }
    }

    fn table(pairs: &[(&str, &str)]) -> ResourceTable {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // ==================== Fresh Translation ====================

    #[tokio::test]
    async fn test_fresh_translation() {
        let source = table(&[("hello", "Hello")]);
        let provider = ScriptedTranslator::new(&[("Hello", "Bonjour")]);

        let outcome = merge(&source, None, &Language::resolve("fr"), &provider)
            .await
            .expect("Should succeed");

        assert_eq!(outcome.table.get("hello"), Some("Bonjour"));
        assert_eq!(outcome.table.len(), 1);
        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.reused, 0);
        assert_eq!(provider.calls(), 1);
    }

    // ==================== Partial Reuse ====================

    #[tokio::test]
    async fn test_partial_reuse() {
        let source = table(&[("a", "A"), ("b", "B")]);
        let existing = table(&[("a", "Ahat")]);
        let provider = ScriptedTranslator::new(&[("B", "Bde")]);

        let outcome = merge(&source, Some(&existing), &Language::resolve("de"), &provider)
            .await
            .expect("Should succeed");

        assert_eq!(outcome.table.get("a"), Some("Ahat"));
        assert_eq!(outcome.table.get("b"), Some("Bde"));
        assert_eq!(outcome.reused, 1);
        assert_eq!(outcome.added, 1);
        // Exactly one call, for "b" only
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_reuse_wins_even_when_source_changed() {
        // The source value for "a" changed since the prior run; the stale
        // existing translation is still kept, by contract.
        let source = table(&[("a", "A changed")]);
        let existing = table(&[("a", "old translation")]);
        let provider = ScriptedTranslator::new(&[]);

        let outcome = merge(&source, Some(&existing), &Language::resolve("de"), &provider)
            .await
            .expect("Should succeed");

        assert_eq!(outcome.table.get("a"), Some("old translation"));
        assert_eq!(provider.calls(), 0);
    }

    // ==================== Pruning ====================

    #[tokio::test]
    async fn test_stale_existing_keys_are_pruned() {
        let source = table(&[("keep", "Keep")]);
        let existing = table(&[("keep", "Kept"), ("stale", "Old stuff")]);
        let provider = ScriptedTranslator::new(&[]);

        let outcome = merge(&source, Some(&existing), &Language::resolve("es"), &provider)
            .await
            .expect("Should succeed");

        assert!(!outcome.table.contains_key("stale"));
        assert_eq!(outcome.table.len(), 1);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_result_order_follows_source_not_existing() {
        let source = table(&[("a", "A"), ("b", "B"), ("c", "C")]);
        let existing = table(&[("c", "Cx"), ("a", "Ax")]);
        let provider = ScriptedTranslator::new(&[]);

        let outcome = merge(&source, Some(&existing), &Language::resolve("it"), &provider)
            .await
            .expect("Should succeed");

        let keys: Vec<&str> = outcome.table.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    // ==================== Native Passthrough ====================

    #[tokio::test]
    async fn test_native_language_passthrough() {
        let source = table(&[("a", "A"), ("b", "B")]);
        let provider = ScriptedTranslator::new(&[]);

        let outcome = merge(&source, None, &Language::native(), &provider)
            .await
            .expect("Should succeed");

        assert_eq!(outcome.table, source);
        assert_eq!(provider.calls(), 0);
        assert_eq!(outcome.added, 2);
    }

    // ==================== Empty Source ====================

    #[tokio::test]
    async fn test_empty_source_yields_empty_result() {
        let source = ResourceTable::new();
        let existing = table(&[("orphan", "whatever")]);
        let provider = ScriptedTranslator::new(&[]);

        let outcome = merge(&source, Some(&existing), &Language::resolve("fr"), &provider)
            .await
            .expect("Should succeed");

        assert!(outcome.table.is_empty());
        assert_eq!(provider.calls(), 0);
    }

    // ==================== Failure Semantics ====================

    #[tokio::test]
    async fn test_provider_failure_aborts_merge() {
        let source = table(&[("a", "A"), ("b", "B")]);
        let provider = ScriptedTranslator::failing();

        let result = merge(&source, None, &Language::resolve("fr"), &provider).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_failure_after_reuse_still_aborts() {
        // The first key reuses fine, the second needs the (failing) provider;
        // nothing escapes.
        let source = table(&[("a", "A"), ("b", "B")]);
        let existing = table(&[("a", "Ahat")]);
        let provider = ScriptedTranslator::failing();

        let result = merge(&source, Some(&existing), &Language::resolve("fr"), &provider).await;
        assert!(result.is_err());
        assert_eq!(provider.calls(), 1);
    }

    // ==================== Idempotence ====================

    #[tokio::test]
    async fn test_idempotence_second_run_is_free() {
        let source = table(&[("x", "X"), ("y", "Y")]);
        let provider = ScriptedTranslator::new(&[("X", "Xfr"), ("Y", "Yfr")]);
        let target = Language::resolve("fr");

        let first = merge(&source, None, &target, &provider)
            .await
            .expect("Should succeed");
        assert_eq!(provider.calls(), 2);

        let second = merge(&source, Some(&first.table), &target, &provider)
            .await
            .expect("Should succeed");

        assert_eq!(second.table, first.table);
        assert_eq!(second.reused, 2);
        assert_eq!(second.added, 0);
        // No further provider traffic
        assert_eq!(provider.calls(), 2);
    }

    proptest! {
        #[test]
        fn prop_merge_is_idempotent(
            pairs in proptest::collection::vec(("[a-z]{1,8}", "[ -~]{0,16}"), 0..10)
        ) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .build()
                .expect("runtime");
            rt.block_on(async {
                let source: ResourceTable = pairs.into_iter().collect();
                let provider = ScriptedTranslator::new(&[]);
                let target = Language::resolve("de");

                let first = merge(&source, None, &target, &provider)
                    .await
                    .expect("first merge");
                let calls_after_first = provider.calls();

                let second = merge(&source, Some(&first.table), &target, &provider)
                    .await
                    .expect("second merge");

                prop_assert_eq!(&second.table, &first.table);
                prop_assert_eq!(provider.calls(), calls_after_first);
                prop_assert_eq!(second.added, 0);
                Ok(())
            })?;
        }
    }
}
