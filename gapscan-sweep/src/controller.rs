use gapscan_hal::{DetectionFlag, InertialReading};
use tracing::{debug, info, warn};

use crate::{
    buffer::{SweepBuffer, SweepPacket},
    codec::PacketCodec,
    config::SweepConfig,
    error::Error,
    fusion::AngleFusionEstimator,
    gap::{GapDetector, RetraceRequest},
    hardware::{SweepHardware, Transmission},
    records::{SampleContext, SampleRecord},
    sample::{SweepSample, INVALID_DISTANCE},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepPhase {
    Idle,
    Sweeping,
    /// Only observable from inside a tick, the sweep is sent and reset in
    /// the tick that completes it.
    Finalizing,
}

/// Snapshot of the controller state between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SweepState {
    pub current_angle: i16,
    pub phase: SweepPhase,
    pub last_valid_distance: i16,
    /// Samples written in the current sweep.
    pub data_index: usize,
}

/// What one regular step measured.
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    /// Servo angle of the regular sample.
    pub servo_angle: i16,
    pub sample: SweepSample,
    pub retrace: Option<RetraceRequest>,
    /// Whether a retrace sample made it into the buffer.
    pub retrace_recorded: bool,
    pub record: SampleRecord,
}

/// A completed sweep.
#[derive(Clone, Debug, PartialEq)]
pub struct SweepReport {
    pub packet: SweepPacket,
    /// `None` if the packet could not be encoded.
    pub encoded_len: Option<usize>,
    pub transmission: Transmission,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutcome {
    /// A new sweep began in this tick.
    pub started: bool,
    pub step: Option<StepReport>,
    pub report: Option<SweepReport>,
}

/// Drives the servo across the arc, one step per tick, and sends every
/// completed sweep as a single packet.
///
/// Distance edges found between two steps are retraced: the servo is moved
/// back to the angle where the edge is expected and sampled once more.
#[derive(Debug)]
pub struct SweepController {
    config: SweepConfig,
    hardware: SweepHardware,
    detection: DetectionFlag,
    gap_detector: GapDetector,
    fusion: AngleFusionEstimator,
    buffer: SweepBuffer,
    current_angle: i16,
    phase: SweepPhase,
    last_valid_distance: i16,
    temperature: f32,
    pressure: f32,
    sweep_count: u32,
}

impl SweepController {
    /// Validates `config` and homes the servo.
    pub fn new(
        config: SweepConfig,
        hardware: SweepHardware,
        detection: DetectionFlag,
    ) -> Result<Self, Error> {
        config.validate()?;
        if config.capacity < config.steps_per_sweep() {
            warn!(
                "capacity {} is smaller than the {} steps of a sweep, the last steps will be dropped",
                config.capacity,
                config.steps_per_sweep()
            );
        }
        hardware
            .servo
            .write_angle(0)
            .map_err(|e| gapscan_hal::Error::initialization("servo", e.to_string()))?;
        Ok(Self {
            gap_detector: config.gap_detector(),
            buffer: SweepBuffer::new(config.capacity),
            config,
            hardware,
            detection,
            fusion: AngleFusionEstimator::new(),
            current_angle: 0,
            phase: SweepPhase::Idle,
            last_valid_distance: 0,
            temperature: 0.0,
            pressure: 0.0,
            sweep_count: 0,
        })
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn phase(&self) -> SweepPhase {
        self.phase
    }

    pub fn current_angle(&self) -> i16 {
        self.current_angle
    }

    pub fn buffer(&self) -> &SweepBuffer {
        &self.buffer
    }

    /// Number of sweeps started so far.
    pub fn sweep_count(&self) -> u32 {
        self.sweep_count
    }

    pub fn state(&self) -> SweepState {
        SweepState {
            current_angle: self.current_angle,
            phase: self.phase,
            last_valid_distance: self.last_valid_distance,
            data_index: self.buffer.valid_count(),
        }
    }

    /// Runs one scheduler iteration: starts a sweep if idle, takes one step,
    /// and sends the sweep if that step completed it.
    pub fn tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.phase == SweepPhase::Idle && self.current_angle == 0 {
            self.start_sweep();
            outcome.started = true;
        }
        outcome.step = Some(self.step());
        if self.current_angle >= self.config.max_angle {
            self.phase = SweepPhase::Finalizing;
            self.buffer.pad_with_sentinels();
            outcome.report = Some(self.finalize());
        }
        outcome
    }

    fn start_sweep(&mut self) {
        self.buffer.reset();
        self.last_valid_distance = 0;
        self.fusion.reset();
        self.temperature = self
            .hardware
            .barometer
            .read_temperature()
            .unwrap_or_else(|e| {
                warn!("failed to read temperature: {e}");
                0.0
            });
        self.pressure = self.hardware.barometer.read_pressure().unwrap_or_else(|e| {
            warn!("failed to read pressure: {e}");
            0.0
        });
        self.sweep_count = self.sweep_count.wrapping_add(1);
        self.phase = SweepPhase::Sweeping;
        info!(
            "sweep {} started at {:.1} degC",
            self.sweep_count, self.temperature
        );
    }

    fn step(&mut self) -> StepReport {
        let servo_angle = self.current_angle;
        let distance = self.read_distance();
        let inertial = self.read_inertial();
        let altitude = self.read_altitude();
        self.fusion
            .integrate(inertial.yaw_rate(), self.hardware.clock.now_millis());
        // Heading at measurement time, before a retrace integrates further.
        let angle = self.fusion.relative_angle(f32::from(servo_angle)).round() as i16;

        let valid = distance != INVALID_DISTANCE;
        let retrace = if valid {
            self.gap_detector.evaluate(
                distance,
                self.last_valid_distance,
                servo_angle - self.config.angle_step,
            )
        } else {
            None
        };
        let retrace_recorded = match retrace {
            Some(request) => self.retrace(request, altitude),
            None => false,
        };

        let sample = SweepSample {
            angle,
            distance,
            altitude,
            accel: inertial.accel,
            gyro: inertial.gyro,
            is_passable: valid && (retrace.is_none() || retrace_recorded),
        };
        if !self.buffer.push(sample) {
            debug!("buffer full, sample at {servo_angle} deg dropped");
        }
        if valid {
            self.last_valid_distance = distance;
        }
        debug!(
            "step {servo_angle} deg: distance {distance} cm, relative angle {}, passable {}",
            sample.angle, sample.is_passable
        );

        let record = SampleRecord::new(
            &sample,
            SampleContext {
                timestamp: self.hardware.clock.now_millis(),
                temperature: self.temperature,
                pressure: self.pressure,
                sweep: self.sweep_count,
                human: self.detection.get(),
            },
        );

        self.current_angle = servo_angle.saturating_add(self.config.angle_step);
        self.move_servo(self.current_angle);

        StepReport {
            servo_angle,
            sample,
            retrace,
            retrace_recorded,
            record,
        }
    }

    /// Samples once more at the retrace angle and returns the servo.
    fn retrace(&mut self, request: RetraceRequest, altitude: f32) -> bool {
        let angle = request.angle.clamp(0, self.config.max_angle);
        debug!(
            "edge of {} cm, retracing at {angle} deg ({:.1} deg correction)",
            request.distance_diff, request.correction_degrees
        );
        self.move_servo(angle);
        self.hardware.clock.delay(self.config.settle_delay());

        let distance = self.read_distance();
        let inertial = self.read_inertial();
        self.fusion
            .integrate(inertial.yaw_rate(), self.hardware.clock.now_millis());
        let recorded = self.buffer.push(SweepSample {
            angle: self.fusion.relative_angle(f32::from(angle)).round() as i16,
            distance,
            altitude,
            accel: inertial.accel,
            gyro: inertial.gyro,
            is_passable: distance != INVALID_DISTANCE,
        });

        self.move_servo(self.current_angle);
        self.hardware.clock.delay(self.config.settle_delay());
        recorded
    }

    fn finalize(&mut self) -> SweepReport {
        let packet = SweepPacket {
            device_id: self.config.device_id,
            timestamp: self.hardware.clock.now_millis(),
            temperature: self.temperature,
            human_detected: self.detection.get(),
            buffer: self.buffer.clone(),
        };
        let encoded = PacketCodec::encode_sweep(&packet, self.config.layout);
        let encoded_len = encoded.as_ref().ok().map(Vec::len);
        info!(
            "sweep {} complete: {} of {} slots, human {}",
            self.sweep_count,
            packet.buffer.valid_count(),
            packet.buffer.capacity(),
            packet.human_detected
        );
        let transmission = Transmission::send(&*self.hardware.radio, encoded);

        self.current_angle = 0;
        self.move_servo(0);
        self.buffer.reset();
        self.last_valid_distance = 0;
        self.phase = SweepPhase::Idle;

        SweepReport {
            packet,
            encoded_len,
            transmission,
        }
    }

    fn read_distance(&self) -> i16 {
        self.hardware.distance.read_distance().unwrap_or_else(|e| {
            warn!("failed to read distance: {e}");
            INVALID_DISTANCE
        })
    }

    fn read_inertial(&self) -> InertialReading {
        self.hardware.inertial.read_inertial().unwrap_or_else(|e| {
            warn!("failed to read inertial sensor: {e}");
            InertialReading::default()
        })
    }

    fn read_altitude(&self) -> f32 {
        if !self.config.read_altitude {
            return 0.0;
        }
        self.hardware
            .barometer
            .read_altitude(self.config.sea_level_hpa)
            .unwrap_or_else(|e| {
                warn!("failed to read altitude: {e}");
                0.0
            })
    }

    fn move_servo(&self, angle: i16) {
        if let Err(e) = self.hardware.servo.write_angle(angle) {
            warn!("failed to move servo to {angle} deg: {e}");
        }
    }
}
