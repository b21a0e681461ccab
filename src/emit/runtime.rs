//! Animation runtime shipped with generated modules that contain animation.
//!
//! `Clock.update` evaluates the same formula as [`crate::AnimationClock::sample`]; keep the two
//! in step when either changes.

use crate::animation::timing::TimingFunction;

const CLOCK_SOURCE: &str = r#"type TimingFunction = (t: number) => number;

class ClockEvent {
  private listeners: Array<() => void> = [];

  on(listener: () => void): void {
    this.listeners.push(listener);
  }

  fire(): void {
    for (const listener of this.listeners) {
      listener();
    }
  }
}

const clocks: Clock[] = [];

class Clock {
  readonly started = new ClockEvent();
  readonly stopped = new ClockEvent();
  readonly iterated = new ClockEvent();
  readonly finished = new ClockEvent();

  private readonly span: number;
  private readonly base: number;
  private startTime = 0;
  private stopTime = 0;
  private baseDirection = 1;
  private d = 1;
  private t = 0;
  private i = 0;
  private isRunning = false;
  private isFinished = false;
  value = 0;

  constructor(
    readonly duration: number,
    readonly delay: number,
    readonly direction: number,
    readonly reverses: boolean,
    readonly iterations: number,
    readonly timing: TimingFunction,
    range: number,
    multiplier: number,
    offset: number,
  ) {
    this.span = range * multiplier;
    this.base = range * offset;
    this.reset();
    clocks.push(this);
  }

  reset(): void {
    this.startTime = 0;
    this.stopTime = 0;
    this.baseDirection = this.direction;
    this.d = this.baseDirection;
    this.t = this.baseDirection === 1 ? 0 : 1;
    this.i = 0;
    this.isRunning = false;
    this.isFinished = false;
    this.value = this.timing(this.t) * this.span + this.base;
  }

  start(): void {
    if (!this.isRunning && !this.isFinished) {
      this.startTime = performance.now() - (this.stopTime - this.startTime);
      this.isRunning = true;
      this.started.fire();
    }
  }

  restart(): void {
    this.reset();
    this.start();
  }

  stop(): void {
    if (this.isRunning && !this.isFinished) {
      this.stopTime = performance.now();
      this.isRunning = false;
      this.stopped.fire();
    }
  }

  toggle(): void {
    if (this.isRunning) {
      this.stop();
    } else {
      this.start();
    }
  }

  rewind(): void {
    if (this.isRunning && !this.isFinished) {
      this.jumpTo(this.i);
    }
  }

  fastForward(): void {
    if (this.isRunning && !this.isFinished) {
      this.jumpTo(this.i + 1);
    }
  }

  reverse(): void {
    if (this.isRunning && !this.isFinished) {
      this.baseDirection = -this.baseDirection;
      this.jumpTo(this.i + (this.d === -1 ? this.t : 1 - this.t));
    }
  }

  private jumpTo(iteration: number): void {
    this.startTime = performance.now() - (this.delay + iteration * this.duration) * 1000;
  }

  update(now: number): void {
    if (!this.isRunning || this.isFinished) {
      return;
    }
    const elapsed = (now - this.startTime) / 1000;
    const progress = Math.max(0, (elapsed - this.delay) / this.duration);
    let iteration = Math.floor(progress);
    if (iteration !== this.i) {
      this.iterated.fire();
    }
    this.t = progress - iteration;
    if (this.iterations !== 0 && iteration >= this.iterations) {
      iteration = this.iterations - 1;
      this.t = 1;
      this.stop();
      this.isFinished = true;
      this.finished.fire();
    }
    this.i = iteration;
    this.d = this.reverses && this.i % 2 === 1 ? -this.baseDirection : this.baseDirection;
    if (this.d === -1) {
      this.t = 1 - this.t;
    }
    this.value = this.timing(this.t) * this.span + this.base;
  }
}

function updateClocks(): void {
  const now = performance.now();
  for (const clock of clocks) {
    clock.update(now);
  }
}
"#;

const MOTION_PATH_SOURCE: &str = r#"type Segment = [number, number, number, number, number, number, number, number];

class MotionPath {
  private readonly total: number;

  constructor(
    readonly segments: Segment[],
    readonly lengths: number[],
    readonly pathClock: Clock,
  ) {
    this.total = lengths.reduce((sum, length) => sum + length, 0);
  }

  private locate(): [Segment, number] | undefined {
    if (this.segments.length === 0) {
      return undefined;
    }
    let remaining = Math.min(Math.max(this.pathClock.value, 0), 1) * this.total;
    for (let i = 0; i < this.segments.length; i++) {
      const length = this.lengths[i];
      if (remaining <= length && length > 0) {
        return [this.segments[i], remaining / length];
      }
      remaining -= length;
    }
    return [this.segments[this.segments.length - 1], 1];
  }

  x(): number {
    const hit = this.locate();
    return hit ? cubic(hit[0][0], hit[0][2], hit[0][4], hit[0][6], hit[1]) : 0;
  }

  y(): number {
    const hit = this.locate();
    return hit ? cubic(hit[0][1], hit[0][3], hit[0][5], hit[0][7], hit[1]) : 0;
  }

  angle(): number {
    const hit = this.locate();
    if (!hit) {
      return 0;
    }
    const [s, t] = hit;
    const dx = cubicSlope(s[0], s[2], s[4], s[6], t);
    const dy = cubicSlope(s[1], s[3], s[5], s[7], t);
    return Math.atan2(dy, dx);
  }
}

function cubic(a: number, b: number, c: number, d: number, t: number): number {
  const u = 1 - t;
  return u * u * u * a + 3 * u * u * t * b + 3 * u * t * t * c + t * t * t * d;
}

function cubicSlope(a: number, b: number, c: number, d: number, t: number): number {
  const u = 1 - t;
  return 3 * u * u * (b - a) + 6 * u * t * (c - b) + 3 * t * t * (d - c);
}
"#;

const TIMING_SOURCE: &str = r#"function bounceOut(t: number): number {
  if (t < 1 / 2.75) {
    return 7.5625 * t * t;
  } else if (t < 2 / 2.75) {
    t -= 1.5 / 2.75;
    return 7.5625 * t * t + 0.75;
  } else if (t < 2.5 / 2.75) {
    t -= 2.25 / 2.75;
    return 7.5625 * t * t + 0.9375;
  }
  t -= 2.625 / 2.75;
  return 7.5625 * t * t + 0.984375;
}

function inOut(t: number, first: TimingFunction, second: TimingFunction, shift: number): number {
  const u = t * 2;
  return u < 1 ? 0.5 * first(u) : 0.5 * second(u + shift);
}
"#;

/// TypeScript body of one timing function, parameter `t` already clamped to `[0, 1]`.
fn timing_body(timing: TimingFunction) -> &'static str {
    use TimingFunction::*;
    match timing {
        Linear => "t",
        SineEaseIn => "1 - Math.cos((t * Math.PI) / 2)",
        SineEaseOut => "Math.sin((t * Math.PI) / 2)",
        SineEaseInOut => "-0.5 * (Math.cos(Math.PI * t) - 1)",
        QuadEaseIn => "t * t",
        QuadEaseOut => "-t * (t - 2)",
        QuadEaseInOut => "inOut(t, (u) => u * u, (u) => -(u * (u - 2) - 1), -1)",
        CubicEaseIn => "t ** 3",
        CubicEaseOut => "(t - 1) ** 3 + 1",
        CubicEaseInOut => "inOut(t, (u) => u ** 3, (u) => u ** 3 + 2, -2)",
        QuartEaseIn => "t ** 4",
        QuartEaseOut => "-((t - 1) ** 4 - 1)",
        QuartEaseInOut => "inOut(t, (u) => u ** 4, (u) => -(u ** 4 - 2), -2)",
        QuintEaseIn => "t ** 5",
        QuintEaseOut => "(t - 1) ** 5 + 1",
        QuintEaseInOut => "inOut(t, (u) => u ** 5, (u) => u ** 5 + 2, -2)",
        CircEaseIn => "-(Math.sqrt(1 - t * t) - 1)",
        CircEaseOut => "Math.sqrt(1 - (t - 1) * (t - 1))",
        CircEaseInOut => {
            "inOut(t, (u) => -(Math.sqrt(1 - u * u) - 1), (u) => Math.sqrt(1 - u * u) + 1, -2)"
        }
        ExpoEaseIn => "t === 0 ? 0 : 2 ** (10 * (t - 1))",
        ExpoEaseOut => "t === 1 ? 1 : 1 - 2 ** (-10 * t)",
        ExpoEaseInOut => {
            "t === 0 || t === 1 ? t : t < 0.5 ? 0.5 * 2 ** (10 * (2 * t - 1)) : 0.5 * (2 - 2 ** (-10 * (2 * t - 1)))"
        }
        BounceEaseIn => "1 - bounceOut(1 - t)",
        BounceEaseOut => "bounceOut(t)",
        BounceEaseInOut => "t < 0.5 ? (1 - bounceOut(1 - 2 * t)) * 0.5 : bounceOut(2 * t - 1) * 0.5 + 0.5",
        ZeroStep => "t <= 0 ? 0 : 1",
        HalfStep => "t < 0.5 ? 0 : 1",
        OneStep => "t >= 1 ? 1 : 0",
        ClockTick => "Math.floor(t * 60) / 60",
    }
}

/// Full runtime source: clock, timing table and motion path.
pub fn runtime_source() -> String {
    let mut out = String::with_capacity(CLOCK_SOURCE.len() + MOTION_PATH_SOURCE.len() + 4096);
    out.push_str(CLOCK_SOURCE);
    out.push('\n');
    out.push_str(TIMING_SOURCE);
    out.push('\n');
    out.push_str("const timing: Record<string, TimingFunction> = {\n");
    for timing in TimingFunction::ALL {
        out.push_str("  ");
        out.push_str(timing.runtime_name());
        out.push_str(": (t) => {\n    t = Math.min(Math.max(t, 0), 1);\n    return ");
        out.push_str(timing_body(timing));
        out.push_str(";\n  },\n");
    }
    out.push_str("};\n\n");
    out.push_str(MOTION_PATH_SOURCE);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/emit/runtime.rs"]
mod tests;
