use std::{io::Cursor, sync::Arc, thread};

use gapscan_hal::{
    DetectionFlag, DummyBarometer, DummyClock, DummyDistanceSensor, DummyInertialSensor,
    DummyServo, LoopbackRadio, RadioTransport,
};
use gapscan_sweep::{
    BinaryLayout, DetectionListener, PacketCodec, SweepConfig, SweepController, SweepHardware,
    SweepReceiver,
};

fn transmitter(
    config: SweepConfig,
    radio: LoopbackRadio,
    detection: DetectionFlag,
) -> SweepController {
    let hardware = SweepHardware {
        distance: Arc::new(DummyDistanceSensor::scripted(
            (0..40).map(|i| Some(100 + (i % 4) * 5)),
            Some(120),
        )),
        inertial: Arc::new(DummyInertialSensor::with_yaw_rate(0.01)),
        barometer: Arc::new(DummyBarometer::default()),
        servo: Arc::new(DummyServo::new()),
        radio: Arc::new(radio),
        clock: Arc::new(DummyClock::new()),
    };
    SweepController::new(config, hardware, detection).unwrap()
}

#[test]
fn test_sweep_arrives_at_receiver() {
    let (tx, rx) = LoopbackRadio::pair_with_max_packet_len(2048);
    let signal = rx.signal();
    let config = SweepConfig {
        layout: BinaryLayout::Full,
        ..Default::default()
    };
    let mut receiver = SweepReceiver::with_max_packet_len(Arc::new(rx), signal, 2048);
    receiver.start().unwrap();

    let detection = DetectionFlag::new();
    let mut controller = transmitter(config, tx, detection.clone());
    DetectionListener::new(detection)
        .run(Cursor::new("{\"detected\":1,\"personTimestamp\":42}\n"))
        .unwrap();

    let mut report = None;
    while report.is_none() {
        assert!(receiver.tick().is_none());
        report = controller.tick().report;
    }
    let report = report.unwrap();
    assert!(report.transmission.is_sent());

    let packet = receiver.tick().unwrap();
    assert_eq!(packet, report.packet);
    assert!(packet.human_detected);
    assert!(receiver.tick().is_none());
    assert_eq!(receiver.received(), 1);
}

#[test]
fn test_compact_sweep_fits_the_radio() {
    let (tx, rx) = LoopbackRadio::pair();
    let signal = rx.signal();
    let mut receiver = SweepReceiver::new(Arc::new(rx), signal);
    receiver.start().unwrap();
    let mut controller = transmitter(SweepConfig::default(), tx, DetectionFlag::new());

    let report = loop {
        if let Some(report) = controller.tick().report {
            break report;
        }
    };
    let packet = receiver.tick().unwrap();
    assert_eq!(packet.buffer.valid_count(), report.packet.buffer.valid_count());
    assert_eq!(packet.temperature, report.packet.temperature);
    for (got, sent) in packet
        .buffer
        .samples()
        .iter()
        .zip(report.packet.buffer.samples())
    {
        assert_eq!(got.angle, sent.angle);
        assert_eq!(got.distance, sent.distance);
        assert_eq!(got.is_passable, sent.is_passable);
        assert_eq!(got.gyro, [0.0; 3]);
    }
}

#[test]
fn test_receiver_on_another_thread() {
    let (tx, rx) = LoopbackRadio::pair();
    let signal = rx.signal();
    let rx: Arc<dyn RadioTransport> = Arc::new(rx);
    rx.start_receive().unwrap();

    let mut controller = transmitter(SweepConfig::default(), tx, DetectionFlag::new());
    let sent = loop {
        if let Some(report) = controller.tick().report {
            break report.packet;
        }
    };

    let handle = thread::spawn(move || {
        let mut receiver = SweepReceiver::new(rx, signal);
        receiver.tick()
    });
    let packet = handle.join().unwrap().unwrap();
    assert_eq!(packet.timestamp, sent.timestamp);
    let distances: Vec<_> = packet.buffer.samples().iter().map(|s| s.distance).collect();
    let expected: Vec<_> = sent.buffer.samples().iter().map(|s| s.distance).collect();
    assert_eq!(distances, expected);
    assert_eq!(
        PacketCodec::encode_sweep(&packet, BinaryLayout::Compact)
            .unwrap()
            .len(),
        243
    );
}
