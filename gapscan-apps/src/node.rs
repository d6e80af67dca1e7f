use std::{
    fmt,
    io::BufReader,
    path::Path,
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

use gapscan_hal::{
    Barometer, Clock, DetectionFlag, DistanceSensor, DummyBarometer, DummyClock,
    DummyInertialSensor, DummyServo, InertialSensor, LoopbackRadio, PacketSignal,
    RadioTransport, Servo, SystemClock,
};
use gapscan_sweep::{
    log_summary, DetectionListener, PacketCodec, ReadingReporter, SensorReading,
    SweepController, SweepHardware, SweepReceiver,
};
use gapscan_tracing::Tracing;
use tracing::{debug, info, warn};

use crate::{Error, NodeConfig, SimulatedRangeFinder};

/// Simulated transmitter hardware plus the receiving end of its radio link.
pub struct SimulatedRig {
    pub hardware: SweepHardware,
    pub receiver_radio: Arc<dyn RadioTransport>,
    pub receiver_signal: PacketSignal,
}

impl fmt::Debug for SimulatedRig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedRig")
            .field("hardware", &self.hardware)
            .field("receiver_signal", &self.receiver_signal)
            .finish_non_exhaustive()
    }
}

impl SimulatedRig {
    pub fn new(config: &NodeConfig) -> Self {
        let trace = config.trace_hardware;
        let (tx, rx) = LoopbackRadio::pair_with_max_packet_len(config.max_packet_len);
        let receiver_signal = rx.signal();
        let servo = Arc::new(DummyServo::new());
        let range_finder =
            SimulatedRangeFinder::new(servo.clone(), config.room.clone(), config.seed);
        let inertial = DummyInertialSensor::with_yaw_rate(config.room.yaw_rate);
        let barometer = DummyBarometer::default();

        let distance: Arc<dyn DistanceSensor> = if trace {
            Arc::new(Tracing::new(range_finder))
        } else {
            Arc::new(range_finder)
        };
        let inertial: Arc<dyn InertialSensor> = if trace {
            Arc::new(Tracing::new(inertial))
        } else {
            Arc::new(inertial)
        };
        let barometer: Arc<dyn Barometer> = if trace {
            Arc::new(Tracing::new(barometer))
        } else {
            Arc::new(barometer)
        };
        let servo: Arc<dyn Servo> = if trace {
            Arc::new(Tracing::new(servo))
        } else {
            servo
        };
        let radio: Arc<dyn RadioTransport> = if trace {
            Arc::new(Tracing::new(tx))
        } else {
            Arc::new(tx)
        };
        let receiver_radio: Arc<dyn RadioTransport> = if trace {
            Arc::new(Tracing::new(rx))
        } else {
            Arc::new(rx)
        };
        let clock: Arc<dyn Clock> = if config.simulated_time {
            Arc::new(DummyClock::new())
        } else {
            Arc::new(SystemClock::new())
        };

        Self {
            hardware: SweepHardware {
                distance,
                inertial,
                barometer,
                servo,
                radio,
                clock,
            },
            receiver_radio,
            receiver_signal,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sweeps: u32,
    pub sent: u32,
    pub received: u32,
}

/// A transmitting node and a receiving node sharing one scheduler loop.
pub struct SweepNode {
    controller: SweepController,
    receiver: SweepReceiver,
    clock: Arc<dyn Clock>,
    tick_interval: Duration,
}

impl fmt::Debug for SweepNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SweepNode")
            .field("controller", &self.controller)
            .field("receiver", &self.receiver)
            .field("tick_interval", &self.tick_interval)
            .finish_non_exhaustive()
    }
}

impl SweepNode {
    pub fn new(config: &NodeConfig, detection: DetectionFlag) -> Result<Self, Error> {
        let rig = SimulatedRig::new(config);
        let clock = rig.hardware.clock.clone();
        let receiver = SweepReceiver::with_max_packet_len(
            rig.receiver_radio,
            rig.receiver_signal,
            config.max_packet_len,
        );
        receiver.start()?;
        let controller = SweepController::new(config.sweep.clone(), rig.hardware, detection)?;
        Ok(Self {
            controller,
            receiver,
            clock,
            tick_interval: config.sweep.tick_interval(),
        })
    }

    pub fn controller(&self) -> &SweepController {
        &self.controller
    }

    /// Runs until `sweeps` sweeps were sent, or forever.
    pub fn run(&mut self, sweeps: Option<u32>) -> RunSummary {
        let mut summary = RunSummary::default();
        while sweeps.map_or(true, |n| summary.sweeps < n) {
            self.tick(&mut summary);
            self.clock.delay(self.tick_interval);
        }
        // The last packet arrives right after its transmission.
        self.receive(&mut summary);
        info!(
            "{} sweeps, {} sent, {} received",
            summary.sweeps, summary.sent, summary.received
        );
        summary
    }

    fn tick(&mut self, summary: &mut RunSummary) {
        self.receive(summary);
        let outcome = self.controller.tick();
        if let Some(step) = &outcome.step {
            match serde_json::to_string(&step.record) {
                Ok(json) => debug!(target: "gapscan_node::serial", "{json}"),
                Err(e) => warn!("failed to serialize sample: {e}"),
            }
        }
        if let Some(report) = outcome.report {
            summary.sweeps += 1;
            if report.transmission.is_sent() {
                summary.sent += 1;
            }
        }
    }

    fn receive(&mut self, summary: &mut RunSummary) {
        if let Some(packet) = self.receiver.tick() {
            summary.received += 1;
            log_summary(&packet);
        }
    }
}

/// Sends one JSON reading per interval and prints what arrives at the other
/// end of the link.
pub struct ReportNode {
    reporter: ReadingReporter,
    receiver_radio: Arc<dyn RadioTransport>,
    clock: Arc<dyn Clock>,
    interval: Duration,
    buf: Vec<u8>,
}

impl fmt::Debug for ReportNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportNode")
            .field("reporter", &self.reporter)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl ReportNode {
    pub fn new(config: &NodeConfig) -> Result<Self, Error> {
        let rig = SimulatedRig::new(config);
        rig.receiver_radio
            .start_receive()
            .map_err(|e| gapscan_hal::Error::initialization("radio", e.to_string()))?;
        Ok(Self {
            clock: rig.hardware.clock.clone(),
            reporter: ReadingReporter::new(rig.hardware, config.sweep.sea_level_hpa),
            receiver_radio: rig.receiver_radio,
            interval: Duration::from_millis(config.report_interval_ms),
            buf: vec![0; config.max_packet_len],
        })
    }

    /// Sends `count` readings, or forever. Returns how many arrived.
    pub fn run(&mut self, count: Option<u32>) -> u32 {
        let mut sent = 0;
        let mut received = 0;
        while count.map_or(true, |n| sent < n) {
            let (_, transmission) = self.reporter.report();
            sent += 1;
            if transmission.is_sent() && self.receive().is_some() {
                received += 1;
            }
            self.clock.delay(self.interval);
        }
        received
    }

    fn receive(&mut self) -> Option<SensorReading> {
        let len = match self.receiver_radio.read_data(&mut self.buf) {
            Ok(len) => len,
            Err(e) => {
                warn!("failed to read packet: {e}");
                return None;
            }
        };
        match PacketCodec::decode_json::<SensorReading>(&self.buf[..len]) {
            Ok(reading) => {
                info!(
                    "distance {} cm, {:.1} degC, {:.0} Pa, altitude {:.1} m",
                    reading.distance, reading.temperature, reading.pressure, reading.altitude
                );
                Some(reading)
            }
            Err(e) => {
                warn!("dropping packet of {len} bytes: {e}");
                None
            }
        }
    }
}

/// Follows the camera link at `path` on its own thread.
pub fn spawn_detection_listener(
    path: &Path,
    flag: DetectionFlag,
) -> Result<JoinHandle<()>, Error> {
    let file = fs_err::File::open(path).map_err(|e| Error::NoFile(path.to_owned(), e))?;
    let listener = DetectionListener::new(flag);
    Ok(thread::spawn(move || {
        match listener.run(BufReader::new(file)) {
            Ok(n) => info!("detection link closed after {n} messages"),
            Err(e) => warn!("detection link failed: {e}"),
        }
    }))
}
