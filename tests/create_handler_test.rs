mod common;

use common::*;

use cluster_provider::client::{ApiError, ApiErrorKind, ClusterState};
use cluster_provider::orchestration::{CallbackContext, HandlerErrorCode, ProgressEvent};
use cluster_provider::{drive_to_completion, Action, ProviderError, ResourceModel};

#[tokio::test]
async fn test_create_stabilizes_across_invocations() {
    let mock = MockControlPlane::new()
        .with_create_response(Ok(create_response(CLUSTER_ARN)))
        .with_describe_states(CLUSTER_ARN, &[ClusterState::Creating, ClusterState::Active]);
    let provider = provider_for(&mock);

    let first = provider
        .handle(Action::Create, request_for(desired_model()), CallbackContext::new())
        .await
        .unwrap();
    let (model, context, delay) = expect_in_progress(first);
    assert_eq!(model.arn.as_deref(), Some(CLUSTER_ARN));
    assert!(context.mutation_issued);
    assert_eq!(context.remaining_timeout_seconds, Some(7170));
    assert_eq!(delay, 30);

    let second = provider
        .handle(Action::Create, request_for(model), context)
        .await
        .unwrap();
    let created = expect_resource(second);
    assert_eq!(created, existing_model());

    assert_eq!(mock.create_calls(), 1);
    // two stabilization probes plus the final read
    assert_eq!(mock.describe_calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_create_driven_to_completion() {
    let mock = MockControlPlane::new()
        .with_create_response(Ok(create_response(CLUSTER_ARN)))
        .with_describe_states(
            CLUSTER_ARN,
            &[
                ClusterState::Creating,
                ClusterState::Creating,
                ClusterState::Active,
            ],
        );
    let provider = provider_for(&mock);

    let event = drive_to_completion(&provider, Action::Create, request_for(desired_model()), 10)
        .await
        .unwrap();

    assert!(event.is_success());
    assert_eq!(
        event.resource_model().and_then(|model| model.arn.as_deref()),
        Some(CLUSTER_ARN)
    );
    assert_eq!(mock.create_calls(), 1);
}

#[tokio::test]
async fn test_resumed_create_does_not_repeat_create_call() {
    let mock = MockControlPlane::new().with_describe_states(CLUSTER_ARN, &[ClusterState::Creating]);
    let provider = provider_for(&mock);
    let context = CallbackContext {
        mutation_issued: true,
        remaining_timeout_seconds: Some(600),
        stabilization_attempts: 3,
    };

    let event = provider
        .handle(Action::Create, request_for(existing_model()), context)
        .await
        .unwrap();

    let (_, context, _) = expect_in_progress(event);
    assert_eq!(context.remaining_timeout_seconds, Some(570));
    assert_eq!(context.stabilization_attempts, 4);
    assert_eq!(mock.create_calls(), 0);
    assert_eq!(mock.describe_calls(), 1);
}

#[tokio::test]
async fn test_create_conflict_is_already_exists() {
    let mock = MockControlPlane::new()
        .with_create_response(Err(ApiError::conflict("Cluster C1 already exists")));
    let provider = provider_for(&mock);

    let event = provider
        .handle(Action::Create, request_for(desired_model()), CallbackContext::new())
        .await
        .unwrap();

    let failure = expect_failure(event);
    assert_eq!(failure.error_code, HandlerErrorCode::AlreadyExists);
    assert!(failure.message.contains("'C1' already exists"));
    assert!(failure.message.contains(TEST_TOKEN));
    assert_eq!(mock.describe_calls(), 0);
}

#[tokio::test]
async fn test_unexpected_state_is_not_stabilized() {
    let mock = MockControlPlane::new()
        .with_create_response(Ok(create_response(CLUSTER_ARN)))
        .with_describe_states(CLUSTER_ARN, &[ClusterState::Failed]);
    let provider = provider_for(&mock);

    let event = provider
        .handle(Action::Create, request_for(desired_model()), CallbackContext::new())
        .await
        .unwrap();

    let failure = expect_failure(event);
    assert_eq!(failure.error_code, HandlerErrorCode::NotStabilized);
    assert_eq!(
        failure.message,
        "[ClientRequestToken: test-token-1] Resource of type 'AWS::MSK::ServerlessCluster' \
         with identifier 'arn:1' did not stabilize."
    );
    assert!(!failure.retryable);
}

#[tokio::test(start_paused = true)]
async fn test_create_budget_exhaustion_is_not_stabilized() {
    let mock = MockControlPlane::new()
        .with_create_response(Ok(create_response(CLUSTER_ARN)))
        .with_describe_states(CLUSTER_ARN, &[ClusterState::Creating]);
    let provider = fast_provider_for(&mock);

    let event = drive_to_completion(&provider, Action::Create, request_for(desired_model()), 10)
        .await
        .unwrap();

    assert_eq!(event.error_code(), Some(HandlerErrorCode::NotStabilized));
    assert_eq!(mock.create_calls(), 1);
    assert_eq!(mock.describe_calls(), 4);
}

#[tokio::test]
async fn test_missing_cluster_name_is_invalid_request() {
    let mock = MockControlPlane::new();
    let provider = provider_for(&mock);

    let event = provider
        .handle(
            Action::Create,
            request_for(ResourceModel::default()),
            CallbackContext::new(),
        )
        .await
        .unwrap();

    assert_eq!(event.error_code(), Some(HandlerErrorCode::InvalidRequest));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_create_stamps_stack_tags() {
    let mock = MockControlPlane::new()
        .with_create_response(Ok(create_response(CLUSTER_ARN)))
        .with_describe_states(CLUSTER_ARN, &[ClusterState::Creating]);
    let provider = provider_for(&mock);
    let request =
        request_for(desired_model()).with_desired_resource_tags(tags(&[("stack", "s1")]));

    provider
        .handle(Action::Create, request, CallbackContext::new())
        .await
        .unwrap();

    match &mock.calls()[0] {
        RecordedCall::CreateCluster(create_request) => {
            assert_eq!(create_request.cluster_name, CLUSTER_NAME);
            assert_eq!(create_request.tags, tags(&[("stack", "s1")]));
            assert!(create_request.serverless.client_authentication.iam_enabled);
        }
        other => panic!("Expected CreateCluster, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_merges_resource_tags_over_stack_tags() {
    let mock = MockControlPlane::new()
        .with_create_response(Ok(create_response(CLUSTER_ARN)))
        .with_describe_states(CLUSTER_ARN, &[ClusterState::Creating]);
    let provider = provider_for(&mock);
    let model = ResourceModel {
        tags: tags(&[("team", "data"), ("stack", "resource")]),
        ..desired_model()
    };
    let request = request_for(model)
        .with_desired_resource_tags(tags(&[("stack", "s1"), ("owner", "platform")]));

    let event = provider
        .handle(Action::Create, request, CallbackContext::new())
        .await
        .unwrap();

    let expected = tags(&[("team", "data"), ("stack", "resource"), ("owner", "platform")]);
    match &mock.calls()[0] {
        RecordedCall::CreateCluster(create_request) => {
            assert_eq!(create_request.tags, expected);
        }
        other => panic!("Expected CreateCluster, got {other:?}"),
    }
    let (model, _, _) = expect_in_progress(event);
    assert_eq!(model.tags, expected);
}

#[tokio::test]
async fn test_create_sends_resource_tags_without_stack_tags() {
    let mock = MockControlPlane::new()
        .with_create_response(Ok(create_response(CLUSTER_ARN)))
        .with_describe_states(CLUSTER_ARN, &[ClusterState::Creating]);
    let provider = provider_for(&mock);
    let model = ResourceModel {
        tags: tags(&[("team", "data")]),
        ..desired_model()
    };

    provider
        .handle(Action::Create, request_for(model), CallbackContext::new())
        .await
        .unwrap();

    match &mock.calls()[0] {
        RecordedCall::CreateCluster(create_request) => {
            assert_eq!(create_request.tags, tags(&[("team", "data")]));
        }
        other => panic!("Expected CreateCluster, got {other:?}"),
    }
}

#[tokio::test]
async fn test_throttled_create_is_retryable() {
    let mock = MockControlPlane::new()
        .with_create_response(Err(ApiError::too_many_requests("Rate exceeded")));
    let provider = provider_for(&mock);

    let event = provider
        .handle(Action::Create, request_for(desired_model()), CallbackContext::new())
        .await
        .unwrap();

    let failure = expect_failure(event);
    assert_eq!(failure.error_code, HandlerErrorCode::Throttling);
    assert!(failure.retryable);
}

#[tokio::test]
async fn test_unrecognized_error_escapes_as_provider_error() {
    let mock = MockControlPlane::new().with_create_response(Err(ApiError::new(
        ApiErrorKind::Client,
        "connection reset",
    )));
    let provider = provider_for(&mock);

    let result = provider
        .handle(Action::Create, request_for(desired_model()), CallbackContext::new())
        .await;

    assert!(matches!(
        result,
        Err(ProviderError::UnhandledRemoteError { .. })
    ));
}

#[tokio::test]
async fn test_probe_failure_during_create_is_classified() {
    let mock = MockControlPlane::new()
        .with_create_response(Ok(create_response(CLUSTER_ARN)))
        .with_describe_response(Err(ApiError::service(
            "Unavailable (Service: Kafka, Status Code: 503)",
            None,
        )));
    let provider = provider_for(&mock);

    let event = provider
        .handle(Action::Create, request_for(desired_model()), CallbackContext::new())
        .await
        .unwrap();

    assert!(matches!(event, ProgressEvent::Failed(_)));
    assert_eq!(event.error_code(), Some(HandlerErrorCode::ServiceInternalError));
}
