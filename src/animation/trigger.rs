use crate::{
    animation::clock::ClockKind,
    foundation::{
        core::FunctionId,
        naming::{clean_parameter, to_identifier},
    },
};

/// Clock lifecycle event a trigger listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ClockEvent {
    Started,
    Stopped,
    Iterated,
    Finished,
}

impl ClockEvent {
    pub fn runtime_name(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Stopped => "stopped",
            Self::Iterated => "iterated",
            Self::Finished => "finished",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "started" | "start" => Some(Self::Started),
            "stopped" | "stop" => Some(Self::Stopped),
            "iterated" | "iteration" => Some(Self::Iterated),
            "finished" | "finish" => Some(Self::Finished),
            _ => None,
        }
    }
}

/// Clock method invoked when a trigger fires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ClockAction {
    #[default]
    Start,
    Restart,
    Stop,
    Toggle,
    Rewind,
    FastForward,
    Reverse,
    Reset,
}

impl ClockAction {
    pub fn runtime_name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Restart => "restart",
            Self::Stop => "stop",
            Self::Toggle => "toggle",
            Self::Rewind => "rewind",
            Self::FastForward => "fastForward",
            Self::Reverse => "reverse",
            Self::Reset => "reset",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "start" => Some(Self::Start),
            "restart" => Some(Self::Restart),
            "stop" => Some(Self::Stop),
            "toggle" => Some(Self::Toggle),
            "rewind" => Some(Self::Rewind),
            "fastforward" | "fast-forward" => Some(Self::FastForward),
            "reverse" => Some(Self::Reverse),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

/// Starts, stops or otherwise drives one clock when a clock of another function emits an event.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Trigger {
    /// Clock of the owning function that receives `action`.
    pub target: ClockKind,
    pub action: ClockAction,
    pub source_function: String,
    pub source_clock: ClockKind,
    pub event: ClockEvent,
    /// Set by [`crate::FunctionCollection::bind_triggers`].
    pub source: Option<FunctionId>,
}

impl Trigger {
    /// Parse `<function>.<clock>.<event>[,<action>]`.
    ///
    /// The clock may carry a `Clock` suffix (`rotateClock`). The function part is sanitized the
    /// same way layer names are, so `Big Ball.path.finished` refers to `bigBall`.
    pub fn parse(target: ClockKind, value: &str) -> Option<Self> {
        let value = clean_parameter(value);
        let (reference, action) = match value.split_once(',') {
            Some((reference, action)) => {
                let action = clean_parameter(action).to_ascii_lowercase();
                (reference, ClockAction::parse(&action)?)
            }
            None => (value, ClockAction::default()),
        };

        let mut parts = reference.split('.').map(str::trim);
        let function = to_identifier(parts.next()?);
        if function.is_empty() {
            return None;
        }
        let clock = parts.next()?.to_ascii_lowercase();
        let event = parts.next()?.to_ascii_lowercase();
        if parts.next().is_some() {
            return None;
        }

        let clock = clock.strip_suffix("clock").unwrap_or(&clock);
        Some(Self {
            target,
            action,
            source_function: function,
            source_clock: ClockKind::from_prefix(clock)?,
            event: ClockEvent::parse(&event)?,
            source: None,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/trigger.rs"]
mod tests;
