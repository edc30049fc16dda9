//! Concurrent fan-out with ordered joins and partial-failure semantics.

use std::future::Future;
use std::pin::Pin;

use futures_util::future::join_all;
use serde::Serialize;

/// Tagged outcome of one fan-out sub-operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome<T> {
    Success { value: T },
    Failure { reason: String },
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success { value } => Some(value),
            Self::Failure { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { reason } => Some(reason),
        }
    }
}

/// Boxed sub-operation, for joining operations of different concrete types
/// into one composite result.
pub type BoxedOperation<T> = Pin<Box<dyn Future<Output = Result<T, String>> + Send>>;

/// Run every operation concurrently and join their outcomes.
///
/// All operations are spawned up front, so they make progress together
/// rather than back to back. The returned vector has one outcome per
/// operation, in input order, regardless of completion order. A failing or
/// panicking operation becomes a `Failure` and never disturbs its siblings.
pub async fn run_all<T, F>(operations: Vec<F>) -> Vec<Outcome<T>>
where
    T: Send + 'static,
    F: Future<Output = Result<T, String>> + Send + 'static,
{
    let handles: Vec<_> = operations.into_iter().map(tokio::spawn).collect();
    join_all(handles)
        .await
        .into_iter()
        .map(|joined| match joined {
            Ok(Ok(value)) => Outcome::Success { value },
            Ok(Err(reason)) => Outcome::Failure { reason },
            Err(e) => Outcome::Failure {
                reason: format!("operation panicked: {e}"),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;
    use std::time::Duration;

    #[tokio::test]
    async fn one_failure_among_four_leaves_the_rest_intact() {
        let operations = vec![
            async { Ok("alpha".to_string()) }.boxed(),
            async { Err("upstream refused".to_string()) }.boxed(),
            async { Ok("gamma".to_string()) }.boxed(),
            async { Ok("delta".to_string()) }.boxed(),
        ];

        let outcomes = run_all(operations).await;
        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes.iter().filter(|o| o.is_success()).count(), 3);
        assert_eq!(outcomes[0].value(), Some(&"alpha".to_string()));
        assert_eq!(outcomes[1].reason(), Some("upstream refused"));
        assert_eq!(outcomes[2].value(), Some(&"gamma".to_string()));
        assert_eq!(outcomes[3].value(), Some(&"delta".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn results_keep_input_order_not_completion_order() {
        let operations = vec![
            async {
                tokio::time::sleep(Duration::from_millis(300)).await;
                Ok(1u32)
            }
            .boxed(),
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                Ok(2u32)
            }
            .boxed(),
            async { Ok(3u32) }.boxed(),
        ];

        let outcomes = run_all(operations).await;
        let values: Vec<_> = outcomes.iter().filter_map(|o| o.value().copied()).collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn operations_run_concurrently_not_sequentially() {
        let start = tokio::time::Instant::now();
        let operations: Vec<_> = (0..5)
            .map(|_| async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok(())
            })
            .collect();

        let outcomes = run_all(operations).await;
        assert_eq!(outcomes.len(), 5);
        // Five one-second operations joined in about one second, not five.
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn a_panicking_operation_is_captured_as_failure() {
        let operations = vec![
            async { Ok(1u32) }.boxed(),
            async { panic!("boom") }.boxed(),
            async { Ok(3u32) }.boxed(),
        ];

        let outcomes = run_all(operations).await;
        assert!(outcomes[0].is_success());
        assert!(outcomes[1].reason().unwrap().contains("panicked"));
        assert!(outcomes[2].is_success());
    }

    #[tokio::test]
    async fn heterogeneous_operations_join_into_one_composite() {
        let operations: Vec<BoxedOperation<serde_json::Value>> = vec![
            async {
                Ok(serde_json::json!({"temperature": 22, "condition": "sunny"}))
            }
            .boxed(),
            async {
                Ok(serde_json::json!({"headlines": ["Tech News 1", "Tech News 2"]}))
            }
            .boxed(),
            async { Err("stock feed timed out".to_string()) }.boxed(),
        ];

        let outcomes = run_all(operations).await;
        assert_eq!(outcomes[0].value().unwrap()["temperature"], 22);
        assert_eq!(outcomes[1].value().unwrap()["headlines"][0], "Tech News 1");
        assert_eq!(outcomes[2].reason(), Some("stock feed timed out"));
    }

    #[test]
    fn outcome_serializes_with_a_tag() {
        let ok: Outcome<u32> = Outcome::Success { value: 7 };
        let json = serde_json::to_string(&ok).unwrap();
        assert!(json.contains("\"outcome\":\"success\""));
        assert!(json.contains("\"value\":7"));

        let err: Outcome<u32> = Outcome::Failure {
            reason: "nope".to_string(),
        };
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"outcome\":\"failure\""));
        assert!(json.contains("\"reason\":\"nope\""));
    }
}
