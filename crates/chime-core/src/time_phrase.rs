use std::sync::OnceLock;

use chrono::NaiveTime;
use regex::Regex;

fn spoken_time_re() -> Option<&'static Regex>
{
  static SPOKEN_TIME_RE: OnceLock<
    Option<Regex>
  > = OnceLock::new();
  SPOKEN_TIME_RE
    .get_or_init(|| {
      Regex::new(
        r"(?i)(?P<hour>[0-9]{1,2})[:\s]?(?P<minute>[0-9]{0,2})?\s*(?P<ampm>am|pm)?",
      )
      .map_err(|error| {
        tracing::error!(
          %error,
          "internal regex compile \
           failure"
        );
      })
      .ok()
    })
    .as_ref()
}

/// Finds the first clock time in a transcript such as "remind me at
/// 9 pm" or "7:05". Text without digits, or digits that do not form a
/// valid time of day, yield `None`.
#[must_use]
pub fn parse_spoken_time(
  speech: &str
) -> Option<NaiveTime> {
  let captures = spoken_time_re()?
    .captures(speech)?;

  let mut hour = captures
    .name("hour")?
    .as_str()
    .parse::<u32>()
    .ok()?;
  let minute = match captures
    .name("minute")
    .map(|m| m.as_str())
  {
    | Some(raw) if !raw.is_empty() => {
      raw.parse::<u32>().ok()?
    }
    | _ => 0
  };

  if let Some(ampm_match) =
    captures.name("ampm")
  {
    match ampm_match
      .as_str()
      .to_ascii_lowercase()
      .as_str()
    {
      | "pm" if hour < 12 => hour += 12,
      | "am" if hour == 12 => hour = 0,
      | _ => {}
    }
  }

  NaiveTime::from_hms_opt(
    hour, minute, 0
  )
}

/// `HH:MM` rendering of [`parse_spoken_time`], ready for a time input.
#[must_use]
pub fn spoken_time_to_hhmm(
  speech: &str
) -> Option<String> {
  let parsed = parse_spoken_time(speech);
  tracing::debug!(
    speech,
    parsed = ?parsed,
    "parsed spoken time"
  );
  parsed.map(|time| {
    time.format("%H:%M").to_string()
  })
}
