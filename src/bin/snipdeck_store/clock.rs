use std::sync::OnceLock;

use time::OffsetDateTime;
use time::format_description::FormatItem;

fn ts_format() -> &'static [FormatItem<'static>] {
    static FMT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();
    FMT.get_or_init(|| {
        time::format_description::parse(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z",
        )
        .expect("valid time format")
    })
}

/// Strictly increasing UTC timestamps with fixed microsecond width, so
/// string order equals time order equals insertion order.
#[derive(Debug, Default)]
pub(crate) struct Clock {
    last: Option<OffsetDateTime>,
}

impl Clock {
    pub(crate) fn tick(&mut self) -> String {
        let now = OffsetDateTime::now_utc();
        let mut now = now
            .replace_nanosecond(now.nanosecond() / 1_000 * 1_000)
            .unwrap_or(now);
        if let Some(last) = self.last
            && now <= last
        {
            now = last + time::Duration::microseconds(1);
        }
        self.last = Some(now);
        now.format(ts_format())
            .unwrap_or_else(|_| now.unix_timestamp().to_string())
    }

    /// Never hand out a timestamp at or before `ts` (used after reload).
    pub(crate) fn observe(&mut self, ts: &str) {
        if let Ok(t) = OffsetDateTime::parse(ts, &time::format_description::well_known::Rfc3339)
            && self.last.is_none_or(|l| t > l)
        {
            self.last = Some(t);
        }
    }
}

/// Random UUID-shaped (version 4) row id.
pub(crate) fn new_row_id() -> anyhow::Result<String> {
    let mut b = [0u8; 16];
    getrandom::getrandom(&mut b).map_err(|e| anyhow::anyhow!("getrandom: {:?}", e))?;
    b[6] = (b[6] & 0x0f) | 0x40;
    b[8] = (b[8] & 0x3f) | 0x80;
    let hex: String = b.iter().map(|x| format!("{:02x}", x)).collect();
    Ok(format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    ))
}

#[cfg(test)]
#[path = "../../tests/bin/snipdeck_store/clock_tests.rs"]
mod tests;
