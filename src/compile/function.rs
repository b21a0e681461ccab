use crate::{
    animation::{clock::ClockKind, trigger::Trigger},
    compile::{draw::DrawFunction, motion::AnimationFunction},
    foundation::core::{Bounds, CanvasId},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionKind {
    Draw,
    Animation,
}

/// Fields shared by every compiled function.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FunctionHeader {
    /// Generated identifier, unique within the collection.
    pub name: String,
    /// Base name as authored in the layer name; may repeat across functions.
    pub requested_name: String,
    pub bounds: Bounds,
    pub canvas: CanvasId,
}

impl FunctionHeader {
    pub fn new(name: impl Into<String>, requested_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requested_name: requested_name.into(),
            bounds: Bounds::EMPTY,
            canvas: CanvasId::MAIN,
        }
    }
}

/// A compiled output unit.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Function {
    Draw(DrawFunction),
    Animation(AnimationFunction),
}

impl Function {
    pub fn kind(&self) -> FunctionKind {
        match self {
            Self::Draw(_) => FunctionKind::Draw,
            Self::Animation(_) => FunctionKind::Animation,
        }
    }

    pub fn header(&self) -> &FunctionHeader {
        match self {
            Self::Draw(f) => &f.header,
            Self::Animation(f) => &f.header,
        }
    }

    pub fn header_mut(&mut self) -> &mut FunctionHeader {
        match self {
            Self::Draw(f) => &mut f.header,
            Self::Animation(f) => &mut f.header,
        }
    }

    pub fn name(&self) -> &str {
        &self.header().name
    }

    pub fn requested_name(&self) -> &str {
        &self.header().requested_name
    }

    pub fn bounds(&self) -> Bounds {
        self.header().bounds
    }

    pub fn as_draw(&self) -> Option<&DrawFunction> {
        match self {
            Self::Draw(f) => Some(f),
            Self::Animation(_) => None,
        }
    }

    pub fn as_draw_mut(&mut self) -> Option<&mut DrawFunction> {
        match self {
            Self::Draw(f) => Some(f),
            Self::Animation(_) => None,
        }
    }

    pub fn as_animation(&self) -> Option<&AnimationFunction> {
        match self {
            Self::Animation(f) => Some(f),
            Self::Draw(_) => None,
        }
    }

    pub fn as_animation_mut(&mut self) -> Option<&mut AnimationFunction> {
        match self {
            Self::Animation(f) => Some(f),
            Self::Draw(_) => None,
        }
    }

    pub fn triggers(&self) -> &[Trigger] {
        match self {
            Self::Draw(f) => &f.triggers,
            Self::Animation(f) => &f.triggers,
        }
    }

    pub fn triggers_mut(&mut self) -> &mut Vec<Trigger> {
        match self {
            Self::Draw(f) => &mut f.triggers,
            Self::Animation(f) => &mut f.triggers,
        }
    }

    /// Whether this function carries a clock of `kind` that triggers can listen to.
    pub fn owns_clock(&self, kind: ClockKind) -> bool {
        match self {
            Self::Draw(_) => matches!(
                kind,
                ClockKind::Rotate | ClockKind::Scale | ClockKind::Alpha
            ),
            Self::Animation(_) => kind == ClockKind::Path,
        }
    }
}
