//! Formatting and lookup helpers shared by the marketplace client and the fallback
//! synthesizer: ISO-8601 durations, price strings, star ratings, airport to city
//! codes and airline names.

use crate::models::hotel::DEFAULT_RATING;

/// Rewrite a compact ISO-8601 duration ("PT5H30M") into "5h 30m".
///
/// Zero parts are omitted and seconds are ignored. Days fold into hours. Empty input
/// yields an empty string; input that is not a duration is returned trimmed.
#[must_use]
pub fn format_iso_duration(iso: &str) -> String {
    let iso = iso.trim();
    if iso.is_empty() {
        return String::new();
    }

    match parse_iso_minutes(iso) {
        Some(total) => format_minutes(total),
        None => iso.to_string(),
    }
}

/// Total minutes of an ISO-8601 duration such as "P1DT2H30M"
fn parse_iso_minutes(iso: &str) -> Option<u32> {
    let rest = iso.strip_prefix('P')?;
    let (date_part, time_part) = match rest.split_once('T') {
        Some((date, time)) => (date, time),
        None => (rest, ""),
    };

    let mut minutes: u32 = 0;
    let mut saw_component = false;

    for (value, unit) in components(date_part)? {
        match unit {
            'D' => minutes = minutes.checked_add(value.checked_mul(24 * 60)?)?,
            _ => return None,
        }
        saw_component = true;
    }

    for (value, unit) in components(time_part)? {
        match unit {
            'H' => minutes = minutes.checked_add(value.checked_mul(60)?)?,
            'M' => minutes = minutes.checked_add(value)?,
            'S' => {}
            _ => return None,
        }
        saw_component = true;
    }

    saw_component.then_some(minutes)
}

/// Split "2H30M" into [(2, 'H'), (30, 'M')]
fn components(part: &str) -> Option<Vec<(u32, char)>> {
    let mut out = Vec::new();
    let mut digits = String::new();

    for c in part.chars() {
        if c.is_ascii_digit() || c == '.' {
            digits.push(c);
        } else {
            // fractional seconds are dropped along with the seconds themselves
            let value = digits.split('.').next()?.parse::<u32>().ok()?;
            out.push((value, c.to_ascii_uppercase()));
            digits.clear();
        }
    }

    digits.is_empty().then_some(out)
}

/// Render minutes as "5h 30m", "2h" or "45m"
#[must_use]
pub fn format_minutes(total: u32) -> String {
    let hours = total / 60;
    let minutes = total % 60;

    match (hours, minutes) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Parse a provider price string; anything malformed or non-finite becomes 0.0
#[must_use]
pub fn parse_price(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .unwrap_or(0.0)
}

/// Parse a free-text star rating, clamped to 0..=5 and defaulted when unusable
#[must_use]
pub fn parse_rating(raw: Option<&str>) -> f64 {
    let parsed = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|r| r.is_finite() && *r > 0.0);

    match parsed {
        Some(rating) => rating.min(5.0),
        None => DEFAULT_RATING,
    }
}

/// Map an airport IATA code to the city code used for hotel lookups.
/// Unmapped codes pass through unchanged.
#[must_use]
pub fn airport_to_city(airport: &str) -> &str {
    match airport {
        "LHR" | "LGW" | "STN" | "LTN" => "LON",
        "CDG" | "ORY" => "PAR",
        "JFK" | "LGA" | "EWR" => "NYC",
        "FCO" | "CIA" => "ROM",
        "NRT" | "HND" => "TYO",
        "SXF" => "BER",
        other => other,
    }
}

/// Display name for an IATA airline code
#[must_use]
pub fn airline_name(code: &str) -> String {
    let name = match code {
        "TK" => "Turkish Airlines",
        "LH" => "Lufthansa",
        "AF" => "Air France",
        "BA" => "British Airways",
        "EK" => "Emirates",
        "QR" => "Qatar Airways",
        "PC" => "Pegasus Airlines",
        "FR" => "Ryanair",
        "U2" => "EasyJet",
        "W6" => "Wizz Air",
        "FZ" => "FlyDubai",
        "HY" => "Uzbekistan Airways",
        "UA" => "United Airlines",
        "AA" => "American Airlines",
        "DL" => "Delta Air Lines",
        "KL" => "KLM",
        "IB" => "Iberia",
        "AZ" => "ITA Airways",
        "OS" => "Austrian Airlines",
        "LX" => "Swiss International Air Lines",
        "SQ" => "Singapore Airlines",
        "CX" => "Cathay Pacific",
        "NH" => "ANA",
        "JL" => "Japan Airlines",
        "EY" => "Etihad Airways",
        "SV" => "Saudi Arabian Airlines",
        "MS" => "EgyptAir",
        "RJ" => "Royal Jordanian",
        "ET" => "Ethiopian Airlines",
        "KQ" => "Kenya Airways",
        "SA" => "South African Airways",
        "" => return "Unknown Airline".to_string(),
        other => return format!("{other} Airlines"),
    };
    name.to_string()
}
