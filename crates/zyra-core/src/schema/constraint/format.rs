use crate::schema::{ColumnDescriptor, Value};
use crate::validate::Violation;

use regex::Regex;
use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;

/// Well-known string formats a column can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Email,
    Url,
    HttpUrl,
    Uuid,
    Cuid,
    Cuid2,
    Nanoid,
    Emoji,
    Hex,
    Jwt,
    Date,
    Time,
    IsoDateTime,
    IsoDate,
    IsoTime,
    Ipv4,
    Ipv6,
}

impl Format {
    pub fn label(self) -> &'static str {
        match self {
            Format::Email => "email address",
            Format::Url => "URL",
            Format::HttpUrl => "HTTP URL",
            Format::Uuid => "UUID",
            Format::Cuid => "CUID",
            Format::Cuid2 => "CUID2",
            Format::Nanoid => "Nano ID",
            Format::Emoji => "emoji",
            Format::Hex => "hexadecimal string",
            Format::Jwt => "JWT",
            Format::Date | Format::IsoDate => "date",
            Format::Time | Format::IsoTime => "time",
            Format::IsoDateTime => "date and time",
            Format::Ipv4 => "IPv4 address",
            Format::Ipv6 => "IPv6 address",
        }
    }

    pub fn matches(self, text: &str) -> bool {
        match self {
            Format::Ipv4 => text.parse::<Ipv4Addr>().is_ok(),
            Format::Ipv6 => text.parse::<Ipv6Addr>().is_ok(),
            format => match patterns().get(&format) {
                Some(regex) => regex.is_match(text),
                None => true,
            },
        }
    }

    pub(crate) fn check(self, column: &ColumnDescriptor, value: &Value) -> Result<(), Violation> {
        let Some(text) = value.as_str() else {
            return Ok(());
        };

        if text.is_empty() || self.matches(text) {
            return Ok(());
        }

        let message = match self {
            Format::Email => "Please enter a valid email address".to_string(),
            Format::Url => "Please enter a valid URL".to_string(),
            format => format!("{} must be a valid {}", column.name, format.label()),
        };

        Err(Violation::new(&column.name, message))
    }
}

fn patterns() -> &'static HashMap<Format, Regex> {
    static PATTERNS: OnceLock<HashMap<Format, Regex>> = OnceLock::new();

    PATTERNS.get_or_init(|| {
        [
            (Format::Email, r"^[A-Z0-9a-z._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}$"),
            (Format::Url, r"^[A-Za-z][A-Za-z0-9+.-]*://[^\s/?#]+\S*$"),
            (Format::HttpUrl, r"^[Hh][Tt][Tt][Pp][Ss]?://[^\s/?#]+\S*$"),
            (
                Format::Uuid,
                r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
            ),
            (Format::Cuid, r"^c[a-z0-9]{24}$"),
            (Format::Cuid2, r"^[a-z][a-z0-9]{1,31}$"),
            (Format::Nanoid, r"^[A-Za-z0-9_-]{21}$"),
            (Format::Emoji, r"^[\p{Extended_Pictographic}\x{200D}\x{FE0F}]+$"),
            (Format::Hex, r"^(0[xX])?[0-9a-fA-F]+$"),
            (Format::Jwt, r"^[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*$"),
            (Format::Date, r"^\d{4}-\d{2}-\d{2}$"),
            (Format::IsoDate, r"^\d{4}-\d{2}-\d{2}$"),
            (Format::Time, r"^\d{2}:\d{2}(:\d{2}(\.\d+)?)?$"),
            (Format::IsoTime, r"^\d{2}:\d{2}(:\d{2}(\.\d+)?)?$"),
            (
                Format::IsoDateTime,
                r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}(:\d{2}(\.\d+)?)?(Z|[+-]\d{2}:?\d{2})?$",
            ),
        ]
        .into_iter()
        .filter_map(|(format, src)| match Regex::new(src) {
            Ok(regex) => Some((format, regex)),
            Err(err) => {
                tracing::debug!(?format, %err, "failed to compile format pattern");
                None
            }
        })
        .collect()
    })
}
