//! mysql_async values to raw column bytes

/// Convert a driver value into the raw bytes the text protocol would have
/// sent for it. `SHOW` and plain `SELECT` statements use the text protocol,
/// so in practice only `Bytes` and `NULL` arrive; the other variants are
/// rendered the way the server formats them.
pub(crate) fn raw_value(value: mysql_async::Value) -> Option<Vec<u8>> {
    match value {
        mysql_async::Value::NULL => None,
        mysql_async::Value::Bytes(bytes) => Some(bytes),
        mysql_async::Value::Int(i) => Some(i.to_string().into_bytes()),
        mysql_async::Value::UInt(u) => Some(u.to_string().into_bytes()),
        mysql_async::Value::Float(f) => Some(f.to_string().into_bytes()),
        mysql_async::Value::Double(d) => Some(d.to_string().into_bytes()),
        mysql_async::Value::Date(year, month, day, hour, min, sec, micro) => {
            let text = if hour == 0 && min == 0 && sec == 0 && micro == 0 {
                format!("{:04}-{:02}-{:02}", year, month, day)
            } else if micro == 0 {
                format!(
                    "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                    year, month, day, hour, min, sec
                )
            } else {
                format!(
                    "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:06}",
                    year, month, day, hour, min, sec, micro
                )
            };
            Some(text.into_bytes())
        }
        mysql_async::Value::Time(negative, days, hours, mins, secs, micros) => {
            let total_hours = days * 24 + u32::from(hours);
            let sign = if negative { "-" } else { "" };
            let text = if micros == 0 {
                format!("{}{:02}:{:02}:{:02}", sign, total_hours, mins, secs)
            } else {
                format!(
                    "{}{:02}:{:02}:{:02}.{:06}",
                    sign, total_hours, mins, secs, micros
                )
            };
            Some(text.into_bytes())
        }
    }
}
