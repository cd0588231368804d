//! Pulse schedules.
//!
//! A [`Schedule`] is the hardware-level program bound to a gate through a
//! calibration: waveforms played on channels, plus frequency shifts and
//! delays. Durations are in device samples (`dt`); amplitudes and durations
//! may stay symbolic until the circuit's parameters are assigned.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parameter::{Parameter, ParameterExpression};

/// A hardware signal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "index", rename_all = "snake_case")]
pub enum Channel {
    /// Single-qubit drive line.
    Drive(u32),
    /// Control line driving a two-qubit interaction.
    Control(u32),
    /// Readout line.
    Measure(u32),
}

impl Channel {
    /// The channel index.
    pub fn index(self) -> u32 {
        match self {
            Channel::Drive(i) | Channel::Control(i) | Channel::Measure(i) => i,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Drive(i) => write!(f, "d{i}"),
            Channel::Control(i) => write!(f, "u{i}"),
            Channel::Measure(i) => write!(f, "m{i}"),
        }
    }
}

/// Parametric pulse envelopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Waveform {
    /// Gaussian with a derivative correction (DRAG).
    Drag {
        /// Pulse length in samples.
        duration: ParameterExpression,
        /// Peak amplitude.
        amp: ParameterExpression,
        /// Gaussian standard deviation in samples.
        sigma: f64,
        /// DRAG correction coefficient.
        beta: f64,
    },
    /// Plain Gaussian.
    Gaussian {
        /// Pulse length in samples.
        duration: ParameterExpression,
        /// Peak amplitude.
        amp: ParameterExpression,
        /// Gaussian standard deviation in samples.
        sigma: f64,
    },
    /// Flat-top pulse with Gaussian rise and fall.
    GaussianSquare {
        /// Pulse length in samples.
        duration: ParameterExpression,
        /// Flat-top amplitude.
        amp: ParameterExpression,
        /// Standard deviation of the edges in samples.
        sigma: f64,
        /// Length of each edge in units of `sigma`.
        risefall_sigma_ratio: f64,
    },
    /// Constant envelope.
    Constant {
        /// Pulse length in samples.
        duration: ParameterExpression,
        /// Amplitude.
        amp: ParameterExpression,
    },
}

impl Waveform {
    /// Pulse length.
    pub fn duration(&self) -> &ParameterExpression {
        match self {
            Waveform::Drag { duration, .. }
            | Waveform::Gaussian { duration, .. }
            | Waveform::GaussianSquare { duration, .. }
            | Waveform::Constant { duration, .. } => duration,
        }
    }

    /// Pulse amplitude.
    pub fn amp(&self) -> &ParameterExpression {
        match self {
            Waveform::Drag { amp, .. }
            | Waveform::Gaussian { amp, .. }
            | Waveform::GaussianSquare { amp, .. }
            | Waveform::Constant { amp, .. } => amp,
        }
    }

    /// Width of the flat top of a `GaussianSquare`, when the duration is known.
    pub fn flat_top_width(&self) -> Option<f64> {
        match self {
            Waveform::GaussianSquare {
                duration,
                sigma,
                risefall_sigma_ratio,
                ..
            } => duration
                .as_f64()
                .map(|d| (d - 2.0 * risefall_sigma_ratio * sigma).max(0.0)),
            _ => None,
        }
    }

    fn expressions_mut(&mut self) -> [&mut ParameterExpression; 2] {
        match self {
            Waveform::Drag { duration, amp, .. }
            | Waveform::Gaussian { duration, amp, .. }
            | Waveform::GaussianSquare { duration, amp, .. }
            | Waveform::Constant { duration, amp } => [duration, amp],
        }
    }
}

/// A single schedule instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PulseInstruction {
    /// Play a waveform on a channel.
    Play {
        /// The envelope.
        waveform: Waveform,
        /// Target channel.
        channel: Channel,
    },
    /// Shift the channel's carrier frequency (Hz).
    ShiftFrequency {
        /// Frequency offset.
        frequency: ParameterExpression,
        /// Target channel.
        channel: Channel,
    },
    /// Idle the channel.
    Delay {
        /// Delay length in samples.
        duration: u64,
        /// Target channel.
        channel: Channel,
    },
}

impl PulseInstruction {
    /// The channel this instruction acts on.
    pub fn channel(&self) -> Channel {
        match self {
            PulseInstruction::Play { channel, .. }
            | PulseInstruction::ShiftFrequency { channel, .. }
            | PulseInstruction::Delay { channel, .. } => *channel,
        }
    }

    fn expressions_mut(&mut self) -> Vec<&mut ParameterExpression> {
        match self {
            PulseInstruction::Play { waveform, .. } => waveform.expressions_mut().into(),
            PulseInstruction::ShiftFrequency { frequency, .. } => vec![frequency],
            PulseInstruction::Delay { .. } => vec![],
        }
    }

    fn expressions(&self) -> Vec<&ParameterExpression> {
        match self {
            PulseInstruction::Play { waveform, .. } => vec![waveform.duration(), waveform.amp()],
            PulseInstruction::ShiftFrequency { frequency, .. } => vec![frequency],
            PulseInstruction::Delay { .. } => vec![],
        }
    }
}

/// An ordered pulse program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Optional schedule name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    instructions: Vec<PulseInstruction>,
}

impl Schedule {
    /// Create an empty, unnamed schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty schedule with a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            instructions: vec![],
        }
    }

    /// Append a `Play`.
    pub fn play(&mut self, waveform: Waveform, channel: Channel) -> &mut Self {
        self.instructions
            .push(PulseInstruction::Play { waveform, channel });
        self
    }

    /// Append a `ShiftFrequency`.
    pub fn shift_frequency(
        &mut self,
        frequency: impl Into<ParameterExpression>,
        channel: Channel,
    ) -> &mut Self {
        self.instructions.push(PulseInstruction::ShiftFrequency {
            frequency: frequency.into(),
            channel,
        });
        self
    }

    /// Append a `Delay`.
    pub fn delay(&mut self, duration: u64, channel: Channel) -> &mut Self {
        self.instructions
            .push(PulseInstruction::Delay { duration, channel });
        self
    }

    /// All instructions in program order.
    pub fn instructions(&self) -> &[PulseInstruction] {
        &self.instructions
    }

    /// The first waveform played, if any.
    pub fn first_waveform(&self) -> Option<&Waveform> {
        self.instructions.iter().find_map(|inst| match inst {
            PulseInstruction::Play { waveform, .. } => Some(waveform),
            _ => None,
        })
    }

    /// Distinct channels used, in first-use order.
    pub fn channels(&self) -> Vec<Channel> {
        let mut out = Vec::new();
        for ch in self.instructions.iter().map(PulseInstruction::channel) {
            if !out.contains(&ch) {
                out.push(ch);
            }
        }
        out
    }

    /// Distinct unbound parameters, in first-occurrence order.
    pub fn parameters(&self) -> Vec<Parameter> {
        let mut out = Vec::new();
        for expr in self.instructions.iter().flat_map(PulseInstruction::expressions) {
            expr.collect_parameters(&mut out);
        }
        out
    }

    /// Total length of the longest channel, once every duration is concrete.
    pub fn duration(&self) -> Option<u64> {
        let mut per_channel: Vec<(Channel, u64)> = Vec::new();
        for inst in &self.instructions {
            let len = match inst {
                PulseInstruction::Play { waveform, .. } => {
                    let d = waveform.duration().as_f64()?;
                    d.max(0.0).round() as u64
                }
                PulseInstruction::Delay { duration, .. } => *duration,
                PulseInstruction::ShiftFrequency { .. } => 0,
            };
            let ch = inst.channel();
            match per_channel.iter_mut().find(|(c, _)| *c == ch) {
                Some((_, total)) => *total += len,
                None => per_channel.push((ch, len)),
            }
        }
        Some(per_channel.into_iter().map(|(_, t)| t).max().unwrap_or(0))
    }

    /// Bind a parameter everywhere it appears.
    pub fn bind(&mut self, param: &Parameter, value: f64) {
        for expr in self
            .instructions
            .iter_mut()
            .flat_map(PulseInstruction::expressions_mut)
        {
            *expr = expr.bind(param, value).simplify();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cr_tone(duration: ParameterExpression) -> Waveform {
        Waveform::GaussianSquare {
            duration,
            amp: 0.1.into(),
            sigma: 64.0,
            risefall_sigma_ratio: 2.0,
        }
    }

    #[test]
    fn test_channel_display() {
        assert_eq!(Channel::Drive(2).to_string(), "d2");
        assert_eq!(Channel::Control(1).to_string(), "u1");
        assert_eq!(Channel::Measure(0).index(), 0);
    }

    #[test]
    fn test_schedule_duration_per_channel() {
        let mut sched = Schedule::named("cr");
        sched
            .play(cr_tone(640.0.into()), Channel::Control(1))
            .delay(100, Channel::Drive(0))
            .play(cr_tone(320.0.into()), Channel::Control(1));
        assert_eq!(sched.duration(), Some(960));
        assert_eq!(sched.channels(), vec![Channel::Control(1), Channel::Drive(0)]);
    }

    #[test]
    fn test_symbolic_duration_is_unknown_until_bound() {
        let t = Parameter::new("t0");
        let mut sched = Schedule::new();
        sched.play(cr_tone((&t).into()), Channel::Control(1));
        assert_eq!(sched.duration(), None);
        assert_eq!(sched.parameters(), vec![t.clone()]);

        sched.bind(&t, 512.0);
        assert_eq!(sched.duration(), Some(512));
        assert!(sched.parameters().is_empty());
        assert_eq!(sched.first_waveform().unwrap().flat_top_width(), Some(256.0));
    }
}
