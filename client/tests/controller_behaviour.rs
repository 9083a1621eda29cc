//! Behavioural coverage for the list controller wired to scripted
//! collaborators: fetch and retry transitions, search narrowing, the
//! delete-then-refetch loop, session-guard side effects and the
//! superseded-fetch guarantee.

use std::sync::Arc;

use client::domain::controller::{
    DELETE_FAILED_MESSAGE, DeleteOutcome, FetchOutcome, LOAD_FAILED_MESSAGE, ListStatus,
    REAUTHENTICATE_MESSAGE, ResourceListController,
};
use client::domain::ports::BackendError;
use client::domain::record::{Activity, RecordId};
use client::domain::session::SessionStore;
use rstest::{fixture, rstest};

mod support;

use support::{
    GatedGateway, RecordingConfirmation, ScriptedGateway, activity, sample_catalogue,
    signed_in_store,
};

struct Context {
    gateway: Arc<ScriptedGateway>,
    confirmation: Arc<RecordingConfirmation>,
    sessions: Arc<SessionStore>,
    controller: ResourceListController<Activity, ScriptedGateway, RecordingConfirmation>,
}

impl Context {
    fn new(confirmation: RecordingConfirmation, sessions: SessionStore) -> Self {
        let gateway = Arc::new(ScriptedGateway::default());
        let shared_confirmation = Arc::new(confirmation);
        let shared_sessions = Arc::new(sessions);
        let controller = ResourceListController::new(
            Arc::clone(&gateway),
            Arc::clone(&shared_confirmation),
            Arc::clone(&shared_sessions),
        );
        Self {
            gateway,
            confirmation: shared_confirmation,
            sessions: shared_sessions,
            controller,
        }
    }
}

#[fixture]
fn ctx() -> Context {
    Context::new(RecordingConfirmation::approving(), signed_in_store())
}

#[rstest]
#[case::category_match("water", &["Surfing"])]
#[case::title_match("temple", &["Temple Tour"])]
#[case::everything("", &["Surfing", "Temple Tour"])]
#[tokio::test]
async fn search_narrows_the_loaded_catalogue(
    ctx: Context,
    #[case] term: &str,
    #[case] expected: &[&str],
) {
    ctx.gateway.push_list(Ok(sample_catalogue()));
    ctx.controller.initialize().await;

    ctx.controller.set_search_term(term);

    let model = ctx.controller.render_model();
    let titles: Vec<&str> = model
        .filtered_records
        .iter()
        .map(|record| record.title.as_str())
        .collect();
    assert_eq!(titles, expected);
    assert_eq!(model.records.len(), 2, "search must never drop records");
}

#[rstest]
#[tokio::test]
async fn failed_fetch_recovers_through_retry(ctx: Context) {
    ctx.gateway
        .push_list(Err(BackendError::transport("connection refused")));
    ctx.gateway.push_list(Ok(sample_catalogue()));

    let failed = ctx.controller.initialize().await;
    assert_eq!(
        failed,
        FetchOutcome::Failed {
            message: LOAD_FAILED_MESSAGE.to_owned(),
            requires_login: false,
        }
    );
    assert_eq!(ctx.controller.render_model().status, ListStatus::Failed);

    let recovered = ctx.controller.retry().await;

    assert_eq!(recovered, FetchOutcome::Loaded { total: 2 });
    let model = ctx.controller.render_model();
    assert_eq!(model.status, ListStatus::Loaded);
    assert_eq!(model.records, sample_catalogue());
    assert_eq!(model.message, None);
}

#[rstest]
#[tokio::test]
async fn confirmed_delete_resynchronises_from_the_backend(ctx: Context) {
    ctx.gateway.push_list(Ok(sample_catalogue()));
    ctx.gateway.push_removal(Ok(()));
    ctx.gateway
        .push_list(Ok(vec![activity(2, "Temple Tour", "Culture")]));
    ctx.controller.initialize().await;

    let outcome = ctx.controller.delete(&RecordId::from(1_u64)).await;

    assert_eq!(
        outcome,
        DeleteOutcome::Deleted {
            refetch: FetchOutcome::Loaded { total: 1 },
        }
    );
    let model = ctx.controller.render_model();
    assert!(
        model.records.iter().all(|record| record.id.as_str() != "1"),
        "deleted id must be gone after the refetch"
    );
    assert_eq!(
        ctx.gateway.observed_removals(),
        vec![(RecordId::from(1_u64), true)],
        "removal must carry the stored bearer token"
    );
    let prompts = ctx.confirmation.observed_prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(
        prompts.first().and_then(|prompt| prompt.title.as_deref()),
        Some("Surfing")
    );
}

#[rstest]
#[tokio::test]
async fn rejected_delete_leaves_the_catalogue_untouched(ctx: Context) {
    ctx.gateway.push_list(Ok(sample_catalogue()));
    ctx.gateway
        .push_removal(Err(BackendError::status(500, "boom")));
    ctx.controller.initialize().await;

    let outcome = ctx.controller.delete(&RecordId::from(1_u64)).await;

    assert_eq!(
        outcome,
        DeleteOutcome::Rejected {
            message: DELETE_FAILED_MESSAGE.to_owned(),
            requires_login: false,
        }
    );
    let model = ctx.controller.render_model();
    assert_eq!(model.records, sample_catalogue());
    assert_eq!(model.status, ListStatus::Loaded);
    assert!(ctx.sessions.is_authenticated());
}

#[tokio::test]
async fn declined_confirmation_makes_no_network_call() {
    let ctx = Context::new(RecordingConfirmation::declining(), signed_in_store());
    ctx.gateway.push_list(Ok(sample_catalogue()));
    ctx.controller.initialize().await;

    let outcome = ctx.controller.delete(&RecordId::from(1_u64)).await;

    assert_eq!(outcome, DeleteOutcome::Cancelled);
    assert!(ctx.gateway.observed_removals().is_empty());
    assert_eq!(ctx.controller.render_model().records, sample_catalogue());
}

#[rstest]
#[case::body_is_json("{\"error\":\"token expired\"}")]
#[case::body_is_html("<html>denied</html>")]
#[case::body_is_empty("")]
#[tokio::test]
async fn unauthorized_fetch_signs_the_user_out(#[case] body: &str) {
    let ctx = Context::new(RecordingConfirmation::approving(), signed_in_store());
    ctx.gateway.push_list(Err(BackendError::status(401, body)));

    let outcome = ctx.controller.initialize().await;

    assert_eq!(
        outcome,
        FetchOutcome::Failed {
            message: REAUTHENTICATE_MESSAGE.to_owned(),
            requires_login: true,
        }
    );
    assert!(
        !ctx.sessions.is_authenticated(),
        "guard must clear credentials regardless of body content"
    );
    let model = ctx.controller.render_model();
    assert!(model.requires_login);
    assert_ne!(
        model.message.as_deref(),
        Some(LOAD_FAILED_MESSAGE),
        "reauthentication wording must differ from the generic failure"
    );
}

#[tokio::test]
async fn stale_fetch_completion_is_discarded() {
    let stale = vec![activity(1, "Surfing", "Water Sports")];
    let fresh = sample_catalogue();
    let gateway = Arc::new(GatedGateway::new(stale, fresh.clone()));
    let controller = Arc::new(ResourceListController::new(
        Arc::clone(&gateway),
        Arc::new(RecordingConfirmation::approving()),
        Arc::new(SessionStore::new()),
    ));

    let slow_controller = Arc::clone(&controller);
    let slow = tokio::spawn(async move { slow_controller.initialize().await });
    gateway.first_call_started().await;

    let newer = controller.initialize().await;
    assert_eq!(newer, FetchOutcome::Loaded { total: 2 });

    gateway.release_first_call();
    let stale_outcome = slow.await.expect("task must not panic");

    assert_eq!(stale_outcome, FetchOutcome::Superseded);
    let model = controller.render_model();
    assert_eq!(
        model.records, fresh,
        "the newer fetch must stay authoritative"
    );
    assert_eq!(model.status, ListStatus::Loaded);
}

#[rstest]
#[tokio::test]
async fn two_controllers_share_only_the_session_store(ctx: Context) {
    ctx.gateway.push_list(Ok(sample_catalogue()));
    ctx.controller.initialize().await;

    let other = Context::new(RecordingConfirmation::approving(), SessionStore::new());
    other.gateway.push_list(Err(BackendError::status(401, "")));
    other.controller.initialize().await;

    assert_eq!(ctx.controller.render_model().status, ListStatus::Loaded);
    assert!(
        ctx.sessions.is_authenticated(),
        "a different store must be untouched by the other guard"
    );
}
