use once_cell::sync::Lazy;
use rand::Rng;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Random token, hex without dashes.
pub fn build_uuid() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Next process-wide id. Ids grow monotonically, so `_id` descending is newest first.
pub fn build_snow_id() -> i64 {
    match ID_GENERATOR.lock() {
        Ok(mut generator) => generator.generate() as i64,
        Err(poisoned) => poisoned.into_inner().generate() as i64,
    }
}

/// Numeric code of `len` digits without a leading zero.
pub fn random_digits(len: u32) -> String {
    let low = 10_u64.pow(len.saturating_sub(1));
    let high = 10_u64.pow(len);
    rand::rng().random_range(low..high).to_string()
}

/// Escapes regex metacharacters so user input can be used in `$regex`.
pub fn regex_escape(value: &str) -> String {
    regex::escape(value)
}

static ID_GENERATOR: Lazy<Mutex<SafeSnowflake>> = Lazy::new(|| Mutex::new(SafeSnowflake::new(1, 1)));

pub struct SafeSnowflake {
    node_id: u64,
    worker_id: u64,
    sequence: u64,
    last_timestamp: u64,
}

impl SafeSnowflake {
    pub fn new(node_id: u64, worker_id: u64) -> Self {
        Self { node_id: node_id & 0x07, worker_id: worker_id & 0x07, sequence: 0, last_timestamp: 0 }
    }

    fn current_timestamp() -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
    }

    pub fn generate(&mut self) -> u64 {
        let mut timestamp = Self::current_timestamp().max(self.last_timestamp);

        if timestamp == self.last_timestamp {
            self.sequence = (self.sequence + 1) & 0x3F;
            if self.sequence == 0 {
                // sequence exhausted for this millisecond
                while timestamp <= self.last_timestamp {
                    timestamp = Self::current_timestamp();
                }
            }
        } else {
            self.sequence = 0;
        }
        self.last_timestamp = timestamp;

        // fits in 53 bits so ids survive JSON number parsing:
        // 41 bits timestamp | 3 bits node | 3 bits worker | 6 bits sequence
        ((timestamp & 0x1FF_FFFF_FFFF) << 12) | (self.node_id << 9) | (self.worker_id << 6) | self.sequence
    }
}
