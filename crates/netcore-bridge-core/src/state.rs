//! State machine interceptor.
//!
//! The only channel where the decision service can rewrite host-visible
//! data. Precedence: a `handled` decision vetoes the write and ignores any
//! overrides; otherwise an override state replaces the new state, and
//! override attributes independently replace the attributes when they parse
//! as a JSON object.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::decision::StateDecider;
use crate::error::{DecisionError, HostResult};
use crate::host::{Context, JsonObject, StateMachine};
use crate::interceptor::{consult, InstallOutcome, InstallSlot, Interceptor};
use crate::types::{StateDecision, StateWriteRequest};

pub const STATE_CHANNEL: &str = "state_interceptor";

/// What to do with a state write once a decision (or none) is in hand.
#[derive(Debug, Clone, PartialEq)]
pub enum StateVerdict {
    Veto,
    Commit {
        state: String,
        attributes: Option<JsonObject>,
    },
}

impl StateVerdict {
    /// Apply `decision` to a pending write. `None` means no decision was
    /// obtained and the write proceeds unchanged.
    pub fn resolve(
        decision: Option<StateDecision>,
        new_state: &str,
        attributes: Option<JsonObject>,
    ) -> Self {
        let Some(decision) = decision else {
            return Self::Commit {
                state: new_state.to_string(),
                attributes,
            };
        };

        if decision.handled {
            return Self::Veto;
        }

        let state = decision
            .override_state
            .unwrap_or_else(|| new_state.to_string());

        let attributes = match decision.override_attributes.as_deref() {
            Some(raw) => match parse_attributes(raw) {
                Ok(replacement) => Some(replacement),
                Err(err) => {
                    error!(
                        error = %err,
                        "net_core_bridge: invalid override attributes, keeping originals"
                    );
                    attributes
                }
            },
            None => attributes,
        };

        Self::Commit { state, attributes }
    }
}

fn parse_attributes(raw: &str) -> Result<JsonObject, DecisionError> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(other) => Err(DecisionError::Malformed(format!(
            "override attributes must be a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(err) => Err(DecisionError::Malformed(err.to_string())),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

pub struct StateWriteInterceptor {
    decider: Arc<dyn StateDecider>,
    original: InstallSlot<dyn StateMachine>,
    timeout: Duration,
}

impl StateWriteInterceptor {
    pub fn new(decider: Arc<dyn StateDecider>, timeout: Duration) -> Self {
        Self {
            decider,
            original: InstallSlot::new(STATE_CHANNEL),
            timeout,
        }
    }
}

impl Interceptor for StateWriteInterceptor {
    type Host = dyn StateMachine;

    fn channel(&self) -> &'static str {
        STATE_CHANNEL
    }

    fn install(&self, original: Arc<dyn StateMachine>) -> InstallOutcome {
        self.original.install(original)
    }

    fn is_installed(&self) -> bool {
        self.original.is_installed()
    }
}

#[async_trait]
impl StateMachine for StateWriteInterceptor {
    async fn set(
        &self,
        entity_id: &str,
        new_state: &str,
        attributes: Option<JsonObject>,
        force: bool,
        context: Option<Context>,
    ) -> HostResult<()> {
        let original = self.original.original()?;

        let request = match attributes.as_ref() {
            Some(attrs) => {
                StateWriteRequest::from_call(entity_id, new_state, attrs, context.as_ref())
            }
            None => StateWriteRequest::from_call(
                entity_id,
                new_state,
                &JsonObject::new(),
                context.as_ref(),
            ),
        };

        let decision = consult(
            STATE_CHANNEL,
            self.timeout,
            self.decider.intercept_state_write(request),
        )
        .await;

        match StateVerdict::resolve(decision, new_state, attributes) {
            StateVerdict::Veto => {
                debug!(entity_id, "net_core_bridge: state write vetoed by decision service");
                Ok(())
            }
            StateVerdict::Commit { state, attributes } => {
                if state != new_state {
                    debug!(
                        entity_id,
                        from = new_state,
                        to = %state,
                        "net_core_bridge: state overridden by decision service"
                    );
                }
                original
                    .set(entity_id, &state, attributes, force, context)
                    .await
            }
        }
    }
}
