//! Wire formats.
//!
//! Full sweeps travel as a little-endian binary envelope:
//!
//! | field | type |
//! |---|---|
//! | magic | `b"GS"` |
//! | version | `u8` |
//! | layout | `u8` (0 = Full, 1 = Compact) |
//! | capacity | `u16` |
//! | device_id | `i8` |
//! | timestamp | `u32` |
//! | temperature | `f32` |
//! | human_detected | `u8` |
//! | valid_count | `u16` |
//! | distance | `[i16; capacity]` |
//! | angle | `[i16; capacity]` |
//! | is_passable | `[u8; capacity]` |
//! | altitude (Full only) | `[f32; capacity]` |
//! | accel x, y, z (Full only) | `[f32; capacity]` each |
//! | gyro x, y, z (Full only) | `[f32; capacity]` each |
//!
//! The header carries the capacity, so a 45-slot receiver rejects a
//! 180-slot packet instead of misreading it. Single readings travel as JSON,
//! see [`crate::records`].

use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    buffer::{SweepBuffer, SweepPacket},
    error::{CodecError, DecodeError},
    sample::SweepSample,
};

pub const MAGIC: [u8; 2] = *b"GS";
pub const VERSION: u8 = 1;
pub const HEADER_LEN: usize = 6;
const FIXED_BODY_LEN: usize = 1 + 4 + 4 + 1 + 2;

/// Which per-sample fields a binary sweep packet carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum BinaryLayout {
    /// Every field of every sample.
    Full,
    /// Distance, angle, and passability only. Small enough for one LoRa
    /// packet at 45 slots; IMU and altitude decode as zero.
    #[default]
    Compact,
}

impl BinaryLayout {
    fn tag(self) -> u8 {
        match self {
            Self::Full => 0,
            Self::Compact => 1,
        }
    }

    fn from_tag(tag: u8) -> Result<Self, DecodeError> {
        match tag {
            0 => Ok(Self::Full),
            1 => Ok(Self::Compact),
            other => Err(DecodeError::UnknownLayout(other)),
        }
    }

    fn bytes_per_slot(self) -> usize {
        match self {
            Self::Full => 2 + 2 + 1 + 4 * 7,
            Self::Compact => 2 + 2 + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PacketCodec;

impl PacketCodec {
    /// Size of an encoded sweep.
    pub fn encoded_len(layout: BinaryLayout, capacity: usize) -> usize {
        HEADER_LEN + FIXED_BODY_LEN + layout.bytes_per_slot() * capacity
    }

    /// The buffer must be padded to its capacity.
    pub fn encode_sweep(packet: &SweepPacket, layout: BinaryLayout) -> Result<Vec<u8>, CodecError> {
        let buffer = &packet.buffer;
        if !buffer.is_padded() {
            return Err(CodecError::NotPadded {
                len: buffer.len(),
                capacity: buffer.capacity(),
            });
        }
        let capacity = u16::try_from(buffer.capacity())
            .map_err(|_| CodecError::CapacityTooLarge(buffer.capacity()))?;
        // valid_count <= capacity, so this cannot truncate.
        let valid_count = buffer.valid_count() as u16;
        let samples = buffer.samples();

        let mut w = Vec::with_capacity(Self::encoded_len(layout, buffer.capacity()));
        w.extend_from_slice(&MAGIC);
        w.push(VERSION);
        w.push(layout.tag());
        w.extend_from_slice(&capacity.to_le_bytes());

        w.extend_from_slice(&packet.device_id.to_le_bytes());
        w.extend_from_slice(&packet.timestamp.to_le_bytes());
        w.extend_from_slice(&packet.temperature.to_le_bytes());
        w.push(u8::from(packet.human_detected));
        w.extend_from_slice(&valid_count.to_le_bytes());

        for s in samples {
            w.extend_from_slice(&s.distance.to_le_bytes());
        }
        for s in samples {
            w.extend_from_slice(&s.angle.to_le_bytes());
        }
        w.extend(samples.iter().map(|s| u8::from(s.is_passable)));

        if layout == BinaryLayout::Full {
            for s in samples {
                w.extend_from_slice(&s.altitude.to_le_bytes());
            }
            for axis in 0..3 {
                for s in samples {
                    w.extend_from_slice(&s.accel[axis].to_le_bytes());
                }
            }
            for axis in 0..3 {
                for s in samples {
                    w.extend_from_slice(&s.gyro[axis].to_le_bytes());
                }
            }
        }
        Ok(w)
    }

    /// Exact inverse of [`encode_sweep`](Self::encode_sweep).
    pub fn decode_sweep(bytes: &[u8]) -> Result<SweepPacket, DecodeError> {
        if bytes.len() < HEADER_LEN {
            return Err(DecodeError::TooShort {
                header: HEADER_LEN,
                actual: bytes.len(),
            });
        }
        let mut r = Reader::new(bytes);
        let magic = r.array::<2>();
        if magic != MAGIC {
            return Err(DecodeError::BadMagic(magic));
        }
        let version = r.u8();
        if version != VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }
        let layout = BinaryLayout::from_tag(r.u8())?;
        let capacity = usize::from(r.u16());
        if capacity == 0 {
            return Err(DecodeError::ZeroCapacity);
        }
        let expected = Self::encoded_len(layout, capacity);
        if bytes.len() != expected {
            return Err(DecodeError::LengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let device_id = r.i8();
        let timestamp = r.u32();
        let temperature = r.f32();
        let human_detected = r.bool()?;
        let valid_count = usize::from(r.u16());
        if valid_count > capacity {
            return Err(DecodeError::ValidCountOutOfRange {
                valid_count,
                capacity,
            });
        }

        let mut samples = vec![SweepSample::default(); capacity];
        for s in samples.iter_mut() {
            s.distance = r.i16();
        }
        for s in samples.iter_mut() {
            s.angle = r.i16();
        }
        for s in samples.iter_mut() {
            s.is_passable = r.bool()?;
        }
        if layout == BinaryLayout::Full {
            for s in samples.iter_mut() {
                s.altitude = r.f32();
            }
            for axis in 0..3 {
                for s in samples.iter_mut() {
                    s.accel[axis] = r.f32();
                }
            }
            for axis in 0..3 {
                for s in samples.iter_mut() {
                    s.gyro[axis] = r.f32();
                }
            }
        }

        let buffer = SweepBuffer::from_parts(samples, valid_count, capacity).ok_or(
            DecodeError::ValidCountOutOfRange {
                valid_count,
                capacity,
            },
        )?;
        Ok(SweepPacket {
            device_id,
            timestamp,
            temperature,
            human_detected,
            buffer,
        })
    }

    pub fn encode_json<T: Serialize>(record: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(record).map_err(|e| CodecError::Json(e.to_string()))
    }

    /// Fails when a required key is absent or has the wrong type.
    pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Cursor over a buffer whose length was checked up front.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn array<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.bytes[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    fn u8(&mut self) -> u8 {
        self.array::<1>()[0]
    }

    fn i8(&mut self) -> i8 {
        i8::from_le_bytes(self.array())
    }

    fn bool(&mut self) -> Result<bool, DecodeError> {
        let offset = self.pos;
        match self.u8() {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(DecodeError::InvalidBool { offset, value }),
        }
    }

    fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.array())
    }

    fn i16(&mut self) -> i16 {
        i16::from_le_bytes(self.array())
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.array())
    }

    fn f32(&mut self) -> f32 {
        f32::from_le_bytes(self.array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::INVALID_DISTANCE;

    fn packet(capacity: usize, valid: usize) -> SweepPacket {
        let mut buffer = SweepBuffer::new(capacity);
        for i in 0..valid {
            buffer.push(SweepSample {
                angle: (i * 5) as i16,
                distance: 100 + i as i16,
                altitude: 12.5,
                accel: [0.1, -0.2, 9.8],
                gyro: [0.01, 0.02, -0.03 * i as f32],
                is_passable: i % 3 != 0,
            });
        }
        buffer.pad_with_sentinels();
        SweepPacket {
            device_id: 3,
            timestamp: 123_456,
            temperature: 22.75,
            human_detected: true,
            buffer,
        }
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(PacketCodec::encoded_len(BinaryLayout::Compact, 45), 243);
        assert_eq!(PacketCodec::encoded_len(BinaryLayout::Full, 45), 18 + 33 * 45);
        let bytes = PacketCodec::encode_sweep(&packet(45, 36), BinaryLayout::Compact).unwrap();
        assert_eq!(bytes.len(), 243);
    }

    #[test]
    fn test_full_roundtrip() {
        let p = packet(45, 36);
        let bytes = PacketCodec::encode_sweep(&p, BinaryLayout::Full).unwrap();
        let decoded = PacketCodec::decode_sweep(&bytes).unwrap();
        assert_eq!(decoded, p);
        assert_eq!(
            PacketCodec::encode_sweep(&decoded, BinaryLayout::Full).unwrap(),
            bytes
        );
    }

    #[test]
    fn test_compact_drops_imu() {
        let p = packet(45, 10);
        let bytes = PacketCodec::encode_sweep(&p, BinaryLayout::Compact).unwrap();
        let decoded = PacketCodec::decode_sweep(&bytes).unwrap();
        assert_eq!(decoded.buffer.valid_count(), 10);
        assert_eq!(decoded.buffer.capacity(), 45);
        assert_eq!(decoded.timestamp, 123_456);
        assert!(decoded.human_detected);
        for (a, b) in decoded.buffer.samples().iter().zip(p.buffer.samples()) {
            assert_eq!(a.angle, b.angle);
            assert_eq!(a.distance, b.distance);
            assert_eq!(a.is_passable, b.is_passable);
            assert_eq!(a.accel, [0.0; 3]);
        }
        assert_eq!(decoded.buffer.samples()[44].distance, INVALID_DISTANCE);
        assert_eq!(
            PacketCodec::encode_sweep(&decoded, BinaryLayout::Compact).unwrap(),
            bytes
        );
    }

    #[test]
    fn test_not_padded() {
        let mut buffer = SweepBuffer::new(4);
        buffer.push(SweepSample::default());
        let p = SweepPacket {
            device_id: 1,
            timestamp: 0,
            temperature: 0.0,
            human_detected: false,
            buffer,
        };
        assert_eq!(
            PacketCodec::encode_sweep(&p, BinaryLayout::Compact),
            Err(CodecError::NotPadded {
                len: 1,
                capacity: 4
            })
        );
    }

    #[test]
    fn test_capacity_mismatch_is_rejected() {
        let bytes = PacketCodec::encode_sweep(&packet(180, 20), BinaryLayout::Compact).unwrap();
        // A 45-slot receiver that trusted its own layout would read garbage.
        assert!(PacketCodec::decode_sweep(&bytes[..243]).is_err());
        assert!(matches!(
            PacketCodec::decode_sweep(&bytes[..243]),
            Err(DecodeError::LengthMismatch {
                expected: 918,
                actual: 243
            })
        ));
    }

    #[test]
    fn test_malformed() {
        let good = PacketCodec::encode_sweep(&packet(5, 5), BinaryLayout::Compact).unwrap();

        assert!(matches!(
            PacketCodec::decode_sweep(&good[..3]),
            Err(DecodeError::TooShort { .. })
        ));

        let mut bad = good.clone();
        bad[0] = b'X';
        assert!(matches!(
            PacketCodec::decode_sweep(&bad),
            Err(DecodeError::BadMagic(_))
        ));

        let mut bad = good.clone();
        bad[2] = 9;
        assert!(matches!(
            PacketCodec::decode_sweep(&bad),
            Err(DecodeError::UnsupportedVersion(9))
        ));

        let mut bad = good.clone();
        bad[3] = 7;
        assert!(matches!(
            PacketCodec::decode_sweep(&bad),
            Err(DecodeError::UnknownLayout(7))
        ));

        let mut bad = good.clone();
        bad.push(0);
        assert!(matches!(
            PacketCodec::decode_sweep(&bad),
            Err(DecodeError::LengthMismatch { .. })
        ));

        // human_detected
        let mut bad = good.clone();
        bad[HEADER_LEN + 9] = 2;
        assert!(matches!(
            PacketCodec::decode_sweep(&bad),
            Err(DecodeError::InvalidBool { value: 2, .. })
        ));

        // valid_count
        let mut bad = good.clone();
        bad[HEADER_LEN + 10] = 6;
        assert!(matches!(
            PacketCodec::decode_sweep(&bad),
            Err(DecodeError::ValidCountOutOfRange {
                valid_count: 6,
                capacity: 5
            })
        ));

        let mut bad = good;
        bad[4] = 0;
        bad[5] = 0;
        assert!(matches!(
            PacketCodec::decode_sweep(&bad),
            Err(DecodeError::ZeroCapacity)
        ));
    }
}
