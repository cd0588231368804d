//! Pulse-level gate builder.
//!
//! [`AnsatzBuilder`] appends abstract pulse gates to a circuit and later
//! attaches a calibration schedule to each of them:
//!
//! - `rx`: a DRAG pulse on the drive channel with a free amplitude,
//! - `cr`: one cross-resonance tone (free duration and amplitude),
//! - `ccr`: a cross-resonance tone with a free frequency shift of the
//!   control drive.
//!
//! While attaching schedules it records, for every free pulse parameter, the
//! [`WrapperEntry`] that maps optimizer values into the parameter's valid
//! range (see [`crate::wrapper`]).
//!
//! Schedules target physical qubits; the builder maps program qubit `i` to
//! `physical_qubits[i]`.

use std::collections::BTreeMap;
use std::sync::Arc;

use ansatz_hal::PulseBackend;
use ansatz_ir::{
    Channel, Circuit, CustomGate, Instruction, Parameter, ParameterExpression, QubitId, Schedule,
    Waveform,
};
use rustc_hash::FxHashMap;
use tracing::{debug, info, instrument};

use crate::error::{AnsatzError, AnsatzResult};
use crate::wrapper::{WrapperConfig, WrapperEntry, WrapperKind};

/// Default upper bound on the flat-top length of a cross-resonance tone.
pub const DEFAULT_MAX_DURATION: f64 = 800.0;

/// Gaussian width of the cross-resonance rise and fall, in samples.
const CR_SIGMA: f64 = 64.0;

/// Length of each cross-resonance edge in units of [`CR_SIGMA`].
const CR_RISEFALL_SIGMA_RATIO: f64 = 2.0;

/// Shortest cross-resonance tone, in samples.
const CR_MIN_DURATION: f64 = 160.0;

/// Builds pulse gates and their schedules for one backend.
pub struct AnsatzBuilder {
    backend: Arc<dyn PulseBackend>,
    physical_qubits: Vec<u32>,
    frequency_shift_ranges: BTreeMap<u32, (f64, f64)>,
    max_duration: f64,
    params: Vec<Parameter>,
    control_channels: FxHashMap<(u32, u32), Channel>,
    wrapper_config: WrapperConfig,
}

impl std::fmt::Debug for AnsatzBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnsatzBuilder")
            .field("backend", &self.backend.name())
            .field("physical_qubits", &self.physical_qubits)
            .field("max_duration", &self.max_duration)
            .field("params", &self.params.len())
            .field("wrapped", &self.wrapper_config.len())
            .finish()
    }
}

impl AnsatzBuilder {
    /// Create a builder targeting `backend`, with program qubit `i` placed
    /// on `physical_qubits[i]`.
    pub fn new(backend: Arc<dyn PulseBackend>, physical_qubits: impl Into<Vec<u32>>) -> Self {
        Self {
            backend,
            physical_qubits: physical_qubits.into(),
            frequency_shift_ranges: BTreeMap::new(),
            max_duration: DEFAULT_MAX_DURATION,
            params: vec![],
            control_channels: FxHashMap::default(),
            wrapper_config: WrapperConfig::new(),
        }
    }

    /// Allowed `(min, max)` frequency shift per physical control qubit, used
    /// by `ccr` gates.
    #[must_use]
    pub fn with_frequency_shift_ranges(
        mut self,
        ranges: impl IntoIterator<Item = (u32, (f64, f64))>,
    ) -> Self {
        self.frequency_shift_ranges = ranges.into_iter().collect();
        self
    }

    /// Maximum flat-top duration of cross-resonance tones.
    #[must_use]
    pub fn with_max_duration(mut self, max_duration: f64) -> Self {
        self.max_duration = max_duration;
        self
    }

    /// The target backend.
    pub fn backend(&self) -> &Arc<dyn PulseBackend> {
        &self.backend
    }

    /// Program-to-physical qubit map.
    pub fn physical_qubits(&self) -> &[u32] {
        &self.physical_qubits
    }

    /// Maximum flat-top duration.
    pub fn max_duration(&self) -> f64 {
        self.max_duration
    }

    /// Parameters allocated so far, in creation order.
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Wrappers recorded by [`AnsatzBuilder::add_schedules`].
    pub fn wrapper_config(&self) -> &WrapperConfig {
        &self.wrapper_config
    }

    /// Allocate a parameter named `prefix` followed by the current count.
    pub fn new_param(&mut self, prefix: &str) -> Parameter {
        let param = Parameter::new(format!("{prefix}{}", self.params.len()));
        self.params.push(param.clone());
        param
    }

    /// Control channel driving `qubits` (physical control, target).
    ///
    /// Backend-reported channels take precedence. Otherwise a channel is
    /// synthesized and cached per pair; the `k`-th synthesized channel is
    /// `u{k}`, counting from 1.
    pub fn control_channel(&mut self, qubits: (u32, u32)) -> Channel {
        if let Some(channel) = self.backend.control_channel(qubits) {
            return channel;
        }
        let next = self.control_channels.len() as u32 + 1;
        *self.control_channels.entry(qubits).or_insert_with(|| {
            debug!(?qubits, channel = next, "synthesizing control channel");
            Channel::Control(next)
        })
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Append an `rx` with a fresh `phi` amplitude parameter.
    pub fn add_rx(&mut self, circuit: &mut Circuit, qubit: u32) -> AnsatzResult<()> {
        let phi = self.new_param("phi");
        circuit.rx(phi, QubitId(qubit))?;
        Ok(())
    }

    /// Append a `cr` gate with params `[duration, amplitude]`.
    ///
    /// Without an explicit `duration` a fresh `t` parameter is used. The
    /// amplitude is always a fresh `phi` parameter.
    pub fn add_cr(
        &mut self,
        circuit: &mut Circuit,
        qubits: (u32, u32),
        duration: Option<ParameterExpression>,
    ) -> AnsatzResult<()> {
        let duration = duration.unwrap_or_else(|| self.new_param("t").into());
        let amp = self.new_param("phi");
        let gate = CustomGate::new("cr", 2).with_params(vec![duration, amp.into()]);
        circuit.append(Instruction::gate(gate, [QubitId(qubits.0), QubitId(qubits.1)]))?;
        Ok(())
    }

    /// Append a `ccr` gate with params `[duration, amplitude, frequency]`.
    ///
    /// Like [`AnsatzBuilder::add_cr`], plus a fresh `f` parameter shifting
    /// the control drive frequency for the duration of the tone.
    pub fn add_ccr(
        &mut self,
        circuit: &mut Circuit,
        qubits: (u32, u32),
        duration: Option<ParameterExpression>,
    ) -> AnsatzResult<()> {
        let duration = duration.unwrap_or_else(|| self.new_param("t").into());
        let amp = self.new_param("phi");
        let freq = self.new_param("f");
        let gate =
            CustomGate::new("ccr", 2).with_params(vec![duration, amp.into(), freq.into()]);
        circuit.append(Instruction::gate(gate, [QubitId(qubits.0), QubitId(qubits.1)]))?;
        Ok(())
    }

    // =========================================================================
    // Schedules
    // =========================================================================

    /// Attach calibrations for every `rx`, `cr` and `ccr` instruction.
    ///
    /// Wrapper entries are keyed by position in `circuit.parameters()`.
    #[instrument(skip_all, fields(circuit = circuit.name()))]
    pub fn add_schedules(&mut self, circuit: &mut Circuit) -> AnsatzResult<()> {
        let circuit_params = circuit.parameters();
        let pulse_gates: Vec<(String, Vec<u32>, Vec<ParameterExpression>)> = circuit
            .instructions()
            .iter()
            .filter(|inst| matches!(inst.name(), "rx" | "cr" | "ccr"))
            .map(|inst| {
                let gate = inst.as_gate();
                (
                    gate.name().to_string(),
                    inst.qubit_indices(),
                    gate.params().into_iter().cloned().collect(),
                )
            })
            .collect();

        for (name, qubits, params) in &pulse_gates {
            let (expected_params, expected_qubits) = match name.as_str() {
                "rx" => (1, 1),
                "cr" => (2, 2),
                _ => (3, 2),
            };
            if params.len() != expected_params {
                return Err(AnsatzError::ParameterArity {
                    gate: name.clone(),
                    expected: expected_params,
                    got: params.len(),
                });
            }
            if qubits.len() != expected_qubits {
                return Err(AnsatzError::QubitArity {
                    gate: name.clone(),
                    expected: expected_qubits,
                    got: qubits.len(),
                });
            }
            let pqubits = self.map_qubits(qubits)?;
            match name.as_str() {
                "rx" => self.add_rx_schedule(circuit, &circuit_params, params, &pqubits)?,
                "cr" => self.add_cr_schedule(circuit, &circuit_params, params, &pqubits)?,
                _ => self.add_ccr_schedule(circuit, &circuit_params, params, &pqubits)?,
            }
        }

        info!(
            gates = pulse_gates.len(),
            calibrations = circuit.calibrations().len(),
            wrapped = self.wrapper_config.len(),
            "attached pulse schedules"
        );
        Ok(())
    }

    fn map_qubits(&self, qubits: &[u32]) -> AnsatzResult<Vec<u32>> {
        qubits
            .iter()
            .map(|&q| {
                self.physical_qubits
                    .get(q as usize)
                    .copied()
                    .ok_or(AnsatzError::UnmappedQubit(q))
            })
            .collect()
    }

    /// Record a wrapper for `expr` unless it is already a number.
    fn wrap(
        &mut self,
        gate: &str,
        circuit_params: &[Parameter],
        expr: &ParameterExpression,
        kind: WrapperKind,
        coefficients: [f64; 4],
        label: &str,
    ) -> AnsatzResult<()> {
        if expr.as_f64().is_some() {
            return Ok(());
        }
        let param = expr
            .as_parameter()
            .ok_or_else(|| AnsatzError::UnsupportedExpression {
                gate: gate.to_string(),
                expr: expr.to_string(),
            })?;
        // Same lookup as `Circuit::parameter_index`, on the list captured once
        // per `add_schedules` call instead of re-sorting it for every gate.
        let index = circuit_params
            .iter()
            .position(|p| p == param)
            .ok_or_else(|| AnsatzError::ParameterNotFound {
                name: param.name().to_string(),
                available: circuit_params.iter().map(|p| p.name().to_string()).collect(),
            })?;
        self.wrapper_config.insert(
            index,
            WrapperEntry::new(kind, coefficients, format!("{label}[{}]", param.name())),
        );
        Ok(())
    }

    fn amp_wrapper(
        &mut self,
        gate: &str,
        circuit_params: &[Parameter],
        amp: &ParameterExpression,
    ) -> AnsatzResult<ParameterExpression> {
        self.wrap(
            gate,
            circuit_params,
            amp,
            WrapperKind::SinWrapper,
            [1.0, 1.0, 0.0, 0.0],
            "amp",
        )?;
        Ok(concrete_or(amp, |v| v))
    }

    fn duration_wrapper(
        &mut self,
        gate: &str,
        circuit_params: &[Parameter],
        duration: &ParameterExpression,
    ) -> AnsatzResult<ParameterExpression> {
        let half = self.max_duration / 2.0;
        let edges = 2.0 * CR_RISEFALL_SIGMA_RATIO * CR_SIGMA;
        self.wrap(
            gate,
            circuit_params,
            duration,
            WrapperKind::SinDurationWrapper,
            [half, 1.0, half + edges, CR_MIN_DURATION],
            "dur",
        )?;
        Ok(concrete_or(duration, f64::trunc))
    }

    fn add_rx_schedule(
        &mut self,
        circuit: &mut Circuit,
        circuit_params: &[Parameter],
        params: &[ParameterExpression],
        pqubits: &[u32],
    ) -> AnsatzResult<()> {
        let amp = self.amp_wrapper("rx", circuit_params, &params[0])?;

        let x_sched = self.backend.instruction_schedule("x", pqubits)?;
        let (duration, sigma, beta) = match x_sched.first_waveform() {
            Some(Waveform::Drag {
                duration,
                sigma,
                beta,
                ..
            }) => (duration.clone(), *sigma, *beta),
            Some(Waveform::Gaussian {
                duration, sigma, ..
            }) => (duration.clone(), *sigma, 0.0),
            _ => {
                return Err(AnsatzError::InvalidDefaultSchedule {
                    gate: "x".into(),
                    qubits: pqubits.to_vec(),
                });
            }
        };

        let mut sched = Schedule::named("rx");
        sched.play(
            Waveform::Drag {
                duration,
                amp: amp.clone(),
                sigma,
                beta,
            },
            Channel::Drive(pqubits[0]),
        );
        circuit.add_calibration("rx", pqubits.to_vec(), vec![amp], sched);
        Ok(())
    }

    fn add_cr_schedule(
        &mut self,
        circuit: &mut Circuit,
        circuit_params: &[Parameter],
        params: &[ParameterExpression],
        pqubits: &[u32],
    ) -> AnsatzResult<()> {
        let duration = self.duration_wrapper("cr", circuit_params, &params[0])?;
        let amp = self.amp_wrapper("cr", circuit_params, &params[1])?;

        let channel = self.control_channel((pqubits[0], pqubits[1]));
        let mut sched = Schedule::named("cr");
        sched.play(cr_tone(duration.clone(), amp.clone()), channel);
        circuit.add_calibration("cr", pqubits.to_vec(), vec![duration, amp], sched);
        Ok(())
    }

    fn add_ccr_schedule(
        &mut self,
        circuit: &mut Circuit,
        circuit_params: &[Parameter],
        params: &[ParameterExpression],
        pqubits: &[u32],
    ) -> AnsatzResult<()> {
        let control = pqubits[0];
        let (lo, hi) = *self
            .frequency_shift_ranges
            .get(&control)
            .ok_or(AnsatzError::MissingFrequencyRange(control))?;

        let duration = self.duration_wrapper("ccr", circuit_params, &params[0])?;
        let amp = self.amp_wrapper("ccr", circuit_params, &params[1])?;
        self.wrap(
            "ccr",
            circuit_params,
            &params[2],
            WrapperKind::SinWrapper,
            [(hi - lo) / 2.0, 1.0, (hi + lo) / 2.0, 0.0],
            "freq",
        )?;
        let freq = concrete_or(&params[2], |v| v);

        let channel = self.control_channel((control, pqubits[1]));
        let mut sched = Schedule::named("ccr");
        sched
            .shift_frequency(freq.clone(), channel)
            .play(cr_tone(duration.clone(), amp.clone()), channel)
            .shift_frequency(-freq.clone(), channel);
        circuit.add_calibration("ccr", pqubits.to_vec(), vec![duration, amp, freq], sched);
        Ok(())
    }
}

fn cr_tone(duration: ParameterExpression, amp: ParameterExpression) -> Waveform {
    Waveform::GaussianSquare {
        duration,
        amp,
        sigma: CR_SIGMA,
        risefall_sigma_ratio: CR_RISEFALL_SIGMA_RATIO,
    }
}

/// `expr` with `f` applied if it is a number, otherwise unchanged.
fn concrete_or(expr: &ParameterExpression, f: impl Fn(f64) -> f64) -> ParameterExpression {
    match expr.as_f64() {
        Some(v) => ParameterExpression::constant(f(v)),
        None => expr.clone(),
    }
}
