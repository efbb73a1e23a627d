//! Request Dispatcher
//!
//! Maps a request body to calls on the credential store, token service and
//! record store, and turns their outcome into a response envelope.

use std::sync::Arc;

use auth::{AccountRepository, CredentialStore, TokenService};
use kernel::username::Username;
use platform::clock::{Clock, SystemClock};
use platform::password::ClearTextPassword;
use serde_json::Value;
use tracking::{RecordStore, StageRecordRepository, parse_tracking_datas, to_tracking_datas};

use crate::domain::entities::AccessLogEntry;
use crate::domain::repository::AccessLogRepository;
use crate::domain::value_objects::RequestMode;
use crate::error::GatewayResult;
use crate::presentation::dto::{Envelope, GatewayRequest, PullPayload, TokenPayload};

/// Request dispatcher
pub struct Dispatcher<A, S, L, C = SystemClock>
where
    A: AccountRepository,
    S: StageRecordRepository,
    L: AccessLogRepository,
    C: Clock,
{
    credentials: CredentialStore<A>,
    tokens: TokenService<C>,
    records: RecordStore<S>,
    access_log: Arc<L>,
}

impl<A, S, L, C> Dispatcher<A, S, L, C>
where
    A: AccountRepository,
    S: StageRecordRepository,
    L: AccessLogRepository,
    C: Clock,
{
    pub fn new(
        credentials: CredentialStore<A>,
        tokens: TokenService<C>,
        records: RecordStore<S>,
        access_log: Arc<L>,
    ) -> Self {
        Self {
            credentials,
            tokens,
            records,
            access_log,
        }
    }

    /// Handle one raw request body
    ///
    /// Never fails: every problem becomes a `"failed"` envelope.
    pub async fn dispatch(&self, body: &[u8]) -> Envelope {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "Request body is not valid JSON");
                let envelope = Envelope::invalid_json();
                self.record_access(String::new(), String::new(), &envelope)
                    .await;
                return envelope;
            }
        };

        let raw_mode = value
            .get("mode")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let request: GatewayRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, mode = %raw_mode, "Request shape mismatch");
                let envelope = Envelope::failed();
                self.record_access(raw_mode, String::new(), &envelope).await;
                return envelope;
            }
        };

        let (envelope, username) = self.handle(&request).await;
        self.record_access(raw_mode, username, &envelope).await;
        envelope
    }

    /// Run the request's mode; returns the envelope and the username to log
    async fn handle(&self, request: &GatewayRequest) -> (Envelope, String) {
        let claimed = request.username.clone().unwrap_or_default();

        let Some(mode) = request.mode.as_deref().and_then(RequestMode::parse) else {
            tracing::debug!("Request rejected: unknown or missing mode");
            return (Envelope::failed(), claimed);
        };

        match mode {
            RequestMode::Create | RequestMode::Authenticate => {
                let (Some(username), Some(password)) = (&request.username, &request.password)
                else {
                    tracing::debug!(mode = %mode, "Request rejected: missing credentials");
                    return (Envelope::failed(), claimed);
                };
                let password = ClearTextPassword::new(password.as_str());
                let result = match mode {
                    RequestMode::Create => self.create(username, &password).await,
                    _ => self.authenticate(username, &password).await,
                };
                (settle(result), claimed)
            }
            RequestMode::Push | RequestMode::Pull => {
                let Some(owner) = self.verified_subject(request.token.as_deref()) else {
                    tracing::debug!(mode = %mode, "Request rejected: no valid token");
                    return (Envelope::failed(), String::new());
                };
                let result = match mode {
                    RequestMode::Push => self.push(&owner, request).await,
                    _ => self.pull(&owner).await,
                };
                (settle(result), owner.into_inner())
            }
        }
    }

    async fn create(&self, username: &str, password: &ClearTextPassword) -> GatewayResult<Envelope> {
        if !self.credentials.create(username, password).await? {
            return Ok(Envelope::failed());
        }
        self.token_envelope(username)
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &ClearTextPassword,
    ) -> GatewayResult<Envelope> {
        if !self.credentials.authenticate(username, password).await? {
            return Ok(Envelope::failed());
        }
        self.token_envelope(username)
    }

    async fn push(&self, owner: &Username, request: &GatewayRequest) -> GatewayResult<Envelope> {
        let Some(datas) = &request.tracking_datas else {
            tracing::debug!(username = %owner, "Push rejected: no trackingDatas");
            return Ok(Envelope::failed());
        };
        let Some(patches) = parse_tracking_datas(datas) else {
            tracing::debug!(username = %owner, "Push rejected: invalid stage data");
            return Ok(Envelope::failed());
        };
        if !self.records.push(owner, &patches).await? {
            return Ok(Envelope::failed());
        }
        Ok(Envelope::success(Value::Object(Default::default())))
    }

    async fn pull(&self, owner: &Username) -> GatewayResult<Envelope> {
        let records = self.records.pull(owner).await?;
        let tracking_datas = to_tracking_datas(&records);
        let payload = serde_json::to_value(PullPayload { tracking_datas })?;
        Ok(Envelope::success(payload))
    }

    fn token_envelope(&self, username: &str) -> GatewayResult<Envelope> {
        // Only reached after the store accepted the name, so it is non-empty.
        let Ok(username) = Username::new(username) else {
            return Ok(Envelope::failed());
        };
        let issued = self.tokens.issue(&username);
        let payload = serde_json::to_value(TokenPayload {
            token: issued.token,
        })?;
        Ok(Envelope::success(payload))
    }

    fn verified_subject(&self, token: Option<&str>) -> Option<Username> {
        self.tokens.verify(token?).into_username()
    }

    async fn record_access(&self, mode: String, username: String, envelope: &Envelope) {
        let entry = AccessLogEntry::new(mode, username, envelope.result);
        if let Err(e) = self.access_log.append(&entry).await {
            tracing::warn!(error = %e, mode = %entry.mode, "Access log append failed");
        }
    }
}

fn settle(result: GatewayResult<Envelope>) -> Envelope {
    match result {
        Ok(envelope) => envelope,
        Err(e) => {
            e.log();
            Envelope::failed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Outcome;
    use crate::infra::memory::InMemoryAccessLogRepository;
    use auth::{AuthConfig, InMemoryAccountRepository};
    use platform::clock::ManualClock;
    use platform::password::PasswordHasher;
    use platform::secret::SecretProvider;
    use serde_json::json;
    use tracking::{InMemoryStageRecordRepository, TrackingConfig};

    const T0: i64 = 1_700_000_000;

    type TestDispatcher = Dispatcher<
        InMemoryAccountRepository,
        InMemoryStageRecordRepository,
        InMemoryAccessLogRepository,
        ManualClock,
    >;

    struct Harness {
        dispatcher: TestDispatcher,
        clock: ManualClock,
        access_log: Arc<InMemoryAccessLogRepository>,
    }

    /// Access log whose storage is always down
    struct UnavailableAccessLog;

    impl AccessLogRepository for UnavailableAccessLog {
        async fn append(&self, _entry: &AccessLogEntry) -> GatewayResult<()> {
            Err(sqlx::Error::PoolTimedOut.into())
        }
    }

    fn dispatcher_with<L: AccessLogRepository>(
        access_log: Arc<L>,
        clock: &ManualClock,
    ) -> Dispatcher<InMemoryAccountRepository, InMemoryStageRecordRepository, L, ManualClock> {
        let secret = SecretProvider::new("test-pepper").unwrap();
        Dispatcher::new(
            CredentialStore::new(
                Arc::new(InMemoryAccountRepository::new()),
                PasswordHasher::new(secret.clone()),
            ),
            TokenService::with_clock(secret, &AuthConfig::default(), clock.clone()),
            RecordStore::new(
                Arc::new(InMemoryStageRecordRepository::new()),
                TrackingConfig::default(),
            ),
            access_log,
        )
    }

    fn harness() -> Harness {
        let clock = ManualClock::new(T0);
        let access_log = Arc::new(InMemoryAccessLogRepository::new());

        Harness {
            dispatcher: dispatcher_with(access_log.clone(), &clock),
            clock,
            access_log,
        }
    }

    async fn send(dispatcher: &TestDispatcher, body: Value) -> Value {
        let envelope = dispatcher.dispatch(body.to_string().as_bytes()).await;
        serde_json::to_value(envelope).unwrap()
    }

    async fn token_for(dispatcher: &TestDispatcher, username: &str, password: &str) -> String {
        let response = send(
            dispatcher,
            json!({"mode": "CREATE", "username": username, "password": password}),
        )
        .await;
        assert_eq!(response["result"], "success");
        response["payload"]["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_example_scenario() {
        let h = harness();
        let d = &h.dispatcher;

        let token = token_for(d, "alice", "secret1").await;

        let auth = send(
            d,
            json!({"mode": "AUTHENTICATE", "username": "alice", "password": "secret1"}),
        )
        .await;
        assert_eq!(auth["result"], "success");
        assert!(auth["payload"]["token"].is_string());

        let wrong = send(
            d,
            json!({"mode": "AUTHENTICATE", "username": "alice", "password": "wrong"}),
        )
        .await;
        assert_eq!(wrong, json!({"result": "failed", "payload": {}}));

        let stage = json!({
            "totalTimer": "00:01:00",
            "timerPerStage": "00:00:45",
            "totalGoalCounter": 2,
            "streakGoalCounter": 1
        });
        let push = send(
            d,
            json!({"mode": "PUSH", "token": token, "trackingDatas": {"3": stage.clone()}}),
        )
        .await;
        assert_eq!(push, json!({"result": "success", "payload": {}}));

        let pull = send(d, json!({"mode": "PULL", "token": token})).await;
        assert_eq!(
            pull,
            json!({"result": "success", "payload": {"trackingDatas": {"3": stage}}})
        );
    }

    #[tokio::test]
    async fn test_invalid_json_body() {
        let h = harness();
        let envelope = h.dispatcher.dispatch(b"{not json").await;
        assert_eq!(envelope, Envelope::invalid_json());

        let entries = h.access_log.entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].mode, "");
        assert_eq!(entries[0].outcome, Outcome::Failed);
    }

    #[tokio::test]
    async fn test_unknown_or_missing_mode_fails() {
        let h = harness();
        for body in [
            json!({}),
            json!({"mode": "DELETE"}),
            json!({"mode": "create", "username": "a", "password": "b"}),
            json!([1, 2, 3]),
            json!("CREATE"),
        ] {
            assert_eq!(
                send(&h.dispatcher, body.clone()).await,
                json!({"result": "failed", "payload": {}}),
                "{body}"
            );
        }
    }

    #[tokio::test]
    async fn test_create_validation() {
        let h = harness();
        let d = &h.dispatcher;
        let failed = json!({"result": "failed", "payload": {}});

        assert_eq!(
            send(d, json!({"mode": "CREATE", "username": "", "password": "x"})).await,
            failed
        );
        assert_eq!(send(d, json!({"mode": "CREATE", "username": "bob"})).await, failed);
        assert_eq!(send(d, json!({"mode": "CREATE", "password": "x"})).await, failed);
        assert_eq!(
            send(d, json!({"mode": "CREATE", "username": null, "password": "x"})).await,
            failed
        );

        // A missing password did not register "bob".
        token_for(d, "bob", "pw").await;
    }

    #[tokio::test]
    async fn test_duplicate_create_fails() {
        let h = harness();
        token_for(&h.dispatcher, "alice", "secret1").await;

        let again = send(
            &h.dispatcher,
            json!({"mode": "CREATE", "username": "alice", "password": "other"}),
        )
        .await;
        assert_eq!(again["result"], "failed");
    }

    #[tokio::test]
    async fn test_push_and_pull_need_valid_token() {
        let h = harness();
        let d = &h.dispatcher;
        let failed = json!({"result": "failed", "payload": {}});

        for token in [json!(null), json!(""), json!("a.b.c"), json!(42)] {
            assert_eq!(send(d, json!({"mode": "PULL", "token": token})).await, failed);
        }
        assert_eq!(send(d, json!({"mode": "PULL"})).await, failed);
        assert_eq!(
            send(d, json!({"mode": "PUSH", "trackingDatas": {}})).await,
            failed
        );
    }

    #[tokio::test]
    async fn test_expired_token_is_refused() {
        let h = harness();
        let token = token_for(&h.dispatcher, "alice", "secret1").await;

        h.clock.advance(3600);
        let ok = send(&h.dispatcher, json!({"mode": "PULL", "token": token})).await;
        assert_eq!(ok["result"], "success");

        h.clock.advance(1);
        let expired = send(&h.dispatcher, json!({"mode": "PULL", "token": token})).await;
        assert_eq!(expired["result"], "failed");
    }

    #[tokio::test]
    async fn test_pull_without_records_is_empty_success() {
        let h = harness();
        let token = token_for(&h.dispatcher, "alice", "secret1").await;

        let pull = send(&h.dispatcher, json!({"mode": "PULL", "token": token})).await;
        assert_eq!(
            pull,
            json!({"result": "success", "payload": {"trackingDatas": {}}})
        );
    }

    #[tokio::test]
    async fn test_push_with_bad_stage_data_fails_without_writes() {
        let h = harness();
        let d = &h.dispatcher;
        let token = token_for(d, "alice", "secret1").await;

        let bad = send(
            d,
            json!({
                "mode": "PUSH",
                "token": token,
                "trackingDatas": {
                    "1": {"totalTimer": "00:01:00"},
                    "2": {"totalTimer": "soon"}
                }
            }),
        )
        .await;
        assert_eq!(bad["result"], "failed");

        let shape = send(
            d,
            json!({
                "mode": "PUSH",
                "token": token,
                "trackingDatas": {"1": {"totalGoalCounter": -1}}
            }),
        )
        .await;
        assert_eq!(shape["result"], "failed");

        let pull = send(d, json!({"mode": "PULL", "token": token})).await;
        assert_eq!(pull["payload"]["trackingDatas"], json!({}));
    }

    #[tokio::test]
    async fn test_records_follow_token_subject() {
        let h = harness();
        let d = &h.dispatcher;
        let alice = token_for(d, "alice", "a").await;
        let bob = token_for(d, "bob", "b").await;

        send(
            d,
            json!({"mode": "PUSH", "token": alice, "trackingDatas": {"1": {"totalGoalCounter": 5}}}),
        )
        .await;

        let bob_pull = send(d, json!({"mode": "PULL", "token": bob})).await;
        assert_eq!(bob_pull["payload"]["trackingDatas"], json!({}));
    }

    #[tokio::test]
    async fn test_access_log_entries() {
        let h = harness();
        let d = &h.dispatcher;
        let token = token_for(d, "alice", "secret1").await;
        send(
            d,
            json!({"mode": "AUTHENTICATE", "username": "alice", "password": "nope"}),
        )
        .await;
        send(d, json!({"mode": "PULL", "token": token})).await;
        send(d, json!({"mode": "PULL", "token": "x.y.z"})).await;

        let entries = h.access_log.entries().await;
        let summary: Vec<(&str, &str, Outcome)> = entries
            .iter()
            .map(|e| (e.mode.as_str(), e.username.as_str(), e.outcome))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("CREATE", "alice", Outcome::Success),
                ("AUTHENTICATE", "alice", Outcome::Failed),
                ("PULL", "alice", Outcome::Success),
                ("PULL", "", Outcome::Failed),
            ]
        );
    }

    #[tokio::test]
    async fn test_access_log_failure_does_not_change_response() {
        let clock = ManualClock::new(T0);
        let d = dispatcher_with(Arc::new(UnavailableAccessLog), &clock);

        let body = json!({"mode": "CREATE", "username": "alice", "password": "secret1"});
        let envelope = d.dispatch(body.to_string().as_bytes()).await;
        assert_eq!(envelope.result, Outcome::Success);
        assert!(envelope.payload["token"].is_string());

        let bad = d.dispatch(b"{not json").await;
        assert_eq!(bad, Envelope::invalid_json());
    }
}
