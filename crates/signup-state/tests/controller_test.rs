//! Lifecycle tests for RegistrationController against stub account services.
//!
//! The gated stub parks every call on a `Notify` so tests can observe the
//! controller while an attempt is in flight, then release it.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;

use signup_core::{
    AccountService, Field, FieldValues, RegistrationOutcome, RegistrationRequest, ValidationError,
};
use signup_state::{
    ControllerError, Observer, RegistrationController, SubmissionPhase, SubmissionState,
    SubmitError,
};

const WRONG_CREDENTIALS: &str = "Username or password is wrong.";

/// Account service that counts calls and waits for `release` before answering.
struct GatedService {
    calls: AtomicU32,
    entered: Notify,
    release: Notify,
    outcome: RegistrationOutcome,
    last_username: Mutex<Option<String>>,
}

impl GatedService {
    fn new(outcome: RegistrationOutcome) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicU32::new(0),
            entered: Notify::new(),
            release: Notify::new(),
            outcome,
            last_username: Mutex::new(None),
        })
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl AccountService for GatedService {
    async fn register(&self, request: &RegistrationRequest) -> RegistrationOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_username.lock() = Some(request.username().to_string());
        self.entered.notify_one();
        self.release.notified().await;
        self.outcome.clone()
    }
}

/// Account service that answers immediately.
struct InstantService(RegistrationOutcome);

#[async_trait::async_trait]
impl AccountService for InstantService {
    async fn register(&self, _: &RegistrationRequest) -> RegistrationOutcome {
        self.0.clone()
    }
}

/// Account service that panics mid-call.
struct PanickingService;

#[async_trait::async_trait]
impl AccountService for PanickingService {
    async fn register(&self, _: &RegistrationRequest) -> RegistrationOutcome {
        panic!("transport exploded");
    }
}

#[derive(Clone, Default)]
struct Recorder {
    seen: Arc<Mutex<Vec<SubmissionState>>>,
}

impl Recorder {
    fn seen(&self) -> Vec<SubmissionState> {
        self.seen.lock().clone()
    }
}

impl Observer for Recorder {
    fn on_state(&self, state: &SubmissionState) {
        self.seen.lock().push(state.clone());
    }
}

fn valid_fields() -> FieldValues {
    FieldValues {
        name: "Test Name".into(),
        username: "test user".into(),
        email: "test@example.com".into(),
        password: "test password".into(),
        confirm_password: "test password".into(),
        needs_mentoring: true,
        available_to_mentor: true,
        accepted_terms: true,
    }
}

fn setup(outcome: RegistrationOutcome) -> (Arc<GatedService>, RegistrationController) {
    let service = GatedService::new(outcome);
    let controller = RegistrationController::new(service.clone());
    (service, controller)
}

// ── Validation gate ──────────────────────────────────────────────────

#[tokio::test]
async fn invalid_fields_are_returned_without_transition_or_call() {
    let (service, controller) = setup(RegistrationOutcome::succeeded("ok"));

    let err = controller.submit(&FieldValues::default()).unwrap_err();
    let result = match err {
        SubmitError::Invalid(result) => result,
        other => panic!("expected validation failure, got {other:?}"),
    };
    assert_eq!(result.error_for(Field::Name), Some(ValidationError::EmptyName));
    assert_eq!(result.error_for(Field::ConfirmPassword), None);

    assert_eq!(controller.state(), SubmissionState::Idle);
    assert_eq!(controller.attempts(), 0);
    assert_eq!(service.calls(), 0);
}

#[tokio::test]
async fn mismatched_confirmation_blocks_submit() {
    let (service, controller) = setup(RegistrationOutcome::succeeded("ok"));
    let fields = FieldValues {
        confirm_password: "test password ".into(),
        ..valid_fields()
    };

    let err = controller.submit(&fields).unwrap_err();
    let result = match err {
        SubmitError::Invalid(result) => result,
        other => panic!("expected validation failure, got {other:?}"),
    };
    assert_eq!(result.error_count(), 1);
    assert_eq!(
        result.error_for(Field::ConfirmPassword),
        Some(ValidationError::PasswordMismatch)
    );
    assert_eq!(service.calls(), 0);
}

// ── In-flight lifecycle ──────────────────────────────────────────────

#[tokio::test]
async fn valid_submit_enters_submitting_and_calls_service_once() {
    let (service, controller) = setup(RegistrationOutcome::succeeded("created"));

    let handle = controller.submit(&valid_fields()).unwrap();
    assert_eq!(handle.attempt(), 1);
    assert_eq!(controller.state(), SubmissionState::Submitting);

    service.entered.notified().await;
    assert_eq!(service.calls(), 1);
    assert_eq!(service.last_username.lock().as_deref(), Some("test user"));

    service.release.notify_one();
    let state = handle.resolved().await.unwrap();
    assert_eq!(state, SubmissionState::Succeeded("created".into()));
    assert_eq!(controller.state(), state);
    assert_eq!(service.calls(), 1);
}

#[tokio::test]
async fn failure_is_published_verbatim_exactly_once() {
    let (service, controller) = setup(RegistrationOutcome::failed(WRONG_CREDENTIALS));
    let recorder = Recorder::default();
    controller.channel().subscribe(recorder.clone());

    let handle = controller.submit(&valid_fields()).unwrap();
    assert!(recorder.seen().is_empty(), "nothing is published on entering Submitting");

    service.release.notify_one();
    handle.resolved().await.unwrap();

    let expected = SubmissionState::Failed(WRONG_CREDENTIALS.into());
    assert_eq!(controller.state(), expected);
    assert_eq!(recorder.seen(), vec![expected]);
}

#[tokio::test]
async fn second_submit_while_in_flight_is_rejected() {
    let (service, controller) = setup(RegistrationOutcome::succeeded("created"));

    let handle = controller.submit(&valid_fields()).unwrap();
    service.entered.notified().await;

    let err = controller.submit(&valid_fields()).unwrap_err();
    assert!(matches!(err, SubmitError::InFlight));
    // Even an invalid snapshot is refused for being in flight, not validated.
    let err = controller.submit(&FieldValues::default()).unwrap_err();
    assert!(matches!(err, SubmitError::InFlight));
    assert_eq!(controller.state(), SubmissionState::Submitting);
    assert_eq!(controller.attempts(), 1);

    service.release.notify_one();
    handle.resolved().await.unwrap();
    assert_eq!(service.calls(), 1, "rejected submits must not reach the service");
}

#[tokio::test]
async fn dropped_handle_does_not_cancel_attempt() {
    let (service, controller) = setup(RegistrationOutcome::succeeded("created"));
    let recorder = Recorder::default();
    controller.channel().subscribe(recorder.clone());

    drop(controller.submit(&valid_fields()).unwrap());
    service.entered.notified().await;
    service.release.notify_one();

    for _ in 0..100 {
        if controller.state().is_terminal() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    assert_eq!(controller.state(), SubmissionState::Succeeded("created".into()));
    assert_eq!(recorder.seen().len(), 1);
}

// ── Terminal states and acknowledgement ──────────────────────────────

#[tokio::test]
async fn terminal_state_requires_acknowledgement_before_resubmit() {
    let (service, controller) = setup(RegistrationOutcome::failed(WRONG_CREDENTIALS));

    let handle = controller.submit(&valid_fields()).unwrap();
    service.release.notify_one();
    handle.resolved().await.unwrap();

    let err = controller.submit(&valid_fields()).unwrap_err();
    assert!(matches!(
        err,
        SubmitError::AwaitingAcknowledgement {
            state: SubmissionPhase::Failed
        }
    ));

    controller.acknowledge().unwrap();
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert_eq!(controller.channel().latest(), None);

    let handle = controller.submit(&valid_fields()).unwrap();
    assert_eq!(handle.attempt(), 2);
    service.release.notify_one();
    handle.resolved().await.unwrap();
    assert_eq!(service.calls(), 2);
}

#[tokio::test]
async fn acknowledge_while_submitting_is_invalid() {
    let (service, controller) = setup(RegistrationOutcome::succeeded("created"));
    let handle = controller.submit(&valid_fields()).unwrap();

    let err = controller.acknowledge().unwrap_err();
    assert!(matches!(
        err,
        ControllerError::InvalidTransition {
            from: SubmissionPhase::Submitting,
            to: SubmissionPhase::Idle
        }
    ));
    assert_eq!(controller.state(), SubmissionState::Submitting);

    service.release.notify_one();
    handle.resolved().await.unwrap();
}

#[tokio::test]
async fn outcome_published_before_subscribe_is_delivered_once() {
    let (service, controller) = setup(RegistrationOutcome::succeeded("created"));

    let handle = controller.submit(&valid_fields()).unwrap();
    service.release.notify_one();
    handle.resolved().await.unwrap();

    let first = Recorder::default();
    controller.channel().subscribe(first.clone());
    assert_eq!(first.seen(), vec![SubmissionState::Succeeded("created".into())]);

    // A screen re-attaching later does not see the stale result again.
    let second = Recorder::default();
    controller.channel().subscribe(second.clone());
    assert!(second.seen().is_empty());
}

#[tokio::test]
async fn history_records_each_transition_in_order() {
    let (service, controller) = setup(RegistrationOutcome::failed(WRONG_CREDENTIALS));

    let handle = controller.submit(&valid_fields()).unwrap();
    service.release.notify_one();
    handle.resolved().await.unwrap();
    controller.acknowledge().unwrap();

    let path: Vec<(SubmissionPhase, SubmissionPhase, u64)> = controller
        .history()
        .iter()
        .map(|r| (r.from, r.to, r.attempt))
        .collect();
    assert_eq!(
        path,
        vec![
            (SubmissionPhase::Idle, SubmissionPhase::Submitting, 1),
            (SubmissionPhase::Submitting, SubmissionPhase::Failed, 1),
            (SubmissionPhase::Failed, SubmissionPhase::Idle, 1),
        ]
    );
}

#[tokio::test]
async fn panicking_service_resolves_to_failed() {
    let controller = RegistrationController::new(Arc::new(PanickingService));
    let recorder = Recorder::default();
    controller.channel().subscribe(recorder.clone());

    let state = controller
        .submit(&valid_fields())
        .unwrap()
        .resolved()
        .await
        .unwrap();

    assert_eq!(state.phase(), SubmissionPhase::Failed);
    assert_eq!(controller.state(), state);
    assert_eq!(recorder.seen().len(), 1);
    assert!(controller.acknowledge().is_ok());
}

// ── Re-entrancy and races ────────────────────────────────────────────

#[tokio::test]
async fn observer_may_acknowledge_from_inside_delivery() {
    let (service, controller) = setup(RegistrationOutcome::failed(WRONG_CREDENTIALS));
    let controller = Arc::new(controller);
    let acks = Arc::new(Mutex::new(Vec::new()));
    {
        let inner = Arc::clone(&controller);
        let acks = Arc::clone(&acks);
        controller
            .channel()
            .subscribe(move |state: &SubmissionState| {
                acks.lock().push((state.clone(), inner.acknowledge().is_ok()));
            });
    }
    let failed = SubmissionState::Failed(WRONG_CREDENTIALS.into());

    let handle = controller.submit(&valid_fields()).unwrap();
    service.entered.notified().await;
    service.release.notify_one();
    assert_eq!(handle.resolved().await.unwrap(), failed);

    assert_eq!(*acks.lock(), vec![(failed.clone(), true)]);
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert_eq!(controller.channel().latest(), None);

    // Acknowledged from the observer, so the screen can submit again.
    let handle = controller.submit(&valid_fields()).unwrap();
    assert_eq!(handle.attempt(), 2);
    service.entered.notified().await;
    service.release.notify_one();
    handle.resolved().await.unwrap();
    assert_eq!(acks.lock().len(), 2);
    assert_eq!(service.calls(), 2);

    // The observer holds the controller; detach it to drop both.
    controller.channel().unsubscribe();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn acknowledge_racing_resolution_never_leaves_stale_result() {
    const ATTEMPTS: usize = 2000;

    let controller = Arc::new(RegistrationController::new(Arc::new(InstantService(
        RegistrationOutcome::failed(WRONG_CREDENTIALS),
    ))));
    controller.channel().subscribe(|_: &SubmissionState| {});

    let stop = Arc::new(AtomicBool::new(false));
    let acker = {
        let controller = Arc::clone(&controller);
        let stop = Arc::clone(&stop);
        std::thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                let _ = controller.acknowledge();
            }
        })
    };

    let mut stale = 0;
    for _ in 0..ATTEMPTS {
        let handle = loop {
            match controller.submit(&valid_fields()) {
                Ok(handle) => break handle,
                Err(SubmitError::AwaitingAcknowledgement { .. }) => tokio::task::yield_now().await,
                Err(other) => panic!("unexpected submit error: {other:?}"),
            }
        };
        handle.resolved().await.unwrap();
        while controller.state() != SubmissionState::Idle {
            tokio::task::yield_now().await;
        }
        if controller.channel().latest().is_some() {
            stale += 1;
        }
    }

    stop.store(true, Ordering::Relaxed);
    acker.join().unwrap();
    assert_eq!(stale, 0, "acknowledged results left in channel: {stale}/{ATTEMPTS}");
}
