use std::sync::Mutex;

use crate::{error::Error, traits::Servo};

/// Dummy Servo for debug or tests. Remembers every command.
#[derive(Debug, Default)]
pub struct DummyServo {
    pub history: Mutex<Vec<i16>>,
}

impl DummyServo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last commanded angle, 0 before the first command.
    pub fn current_angle(&self) -> i16 {
        self.history.lock().unwrap().last().copied().unwrap_or(0)
    }

    pub fn history(&self) -> Vec<i16> {
        self.history.lock().unwrap().clone()
    }
}

impl Servo for DummyServo {
    fn write_angle(&self, degrees: i16) -> Result<(), Error> {
        self.history.lock().unwrap().push(degrees);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history() {
        let servo = DummyServo::new();
        assert_eq!(servo.current_angle(), 0);
        servo.write_angle(15).unwrap();
        servo.write_angle(20).unwrap();
        assert_eq!(servo.current_angle(), 20);
        assert_eq!(servo.history(), vec![15, 20]);
    }
}
