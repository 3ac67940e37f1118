//! Static route, airline and hotel tables backing the estimated results

/// Base fare and block time for a route
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteProfile {
    pub base_price: f64,
    pub minutes: u32,
}

/// Used for any pair missing from the route table
pub const DEFAULT_ROUTE: RouteProfile = RouteProfile {
    base_price: 350.0,
    minutes: 240,
};

#[derive(Debug, Clone, Copy)]
pub struct AirlineProfile {
    pub name: &'static str,
    pub price_multiplier: f64,
    pub stops: u32,
}

/// Five carriers across price tiers, nonstop and one-stop
pub const AIRLINES: [AirlineProfile; 5] = [
    AirlineProfile {
        name: "Turkish Airlines",
        price_multiplier: 1.00,
        stops: 0,
    },
    AirlineProfile {
        name: "Lufthansa",
        price_multiplier: 1.15,
        stops: 0,
    },
    AirlineProfile {
        name: "Emirates",
        price_multiplier: 1.30,
        stops: 0,
    },
    AirlineProfile {
        name: "Wizz Air",
        price_multiplier: 0.65,
        stops: 1,
    },
    AirlineProfile {
        name: "FlyDubai",
        price_multiplier: 0.80,
        stops: 1,
    },
];

/// Look up a route in either direction
#[must_use]
pub fn route_profile(origin: &str, destination: &str) -> RouteProfile {
    let (base_price, minutes) = match sorted_pair(origin, destination) {
        ("IST", "TAS") => (280.0, 300),
        ("DXB", "TAS") => (320.0, 210),
        ("FRA", "TAS") => (450.0, 420),
        ("LHR", "TAS") => (500.0, 480),
        ("CDG", "TAS") => (480.0, 450),
        ("BER", "PAR") => (120.0, 105),
        ("BER", "LHR") => (100.0, 100),
        ("DXB", "IST") => (250.0, 240),
        ("JFK", "LHR") => (450.0, 480),
        ("CDG", "LHR") => (80.0, 75),
        ("FRA", "IST") => (150.0, 165),
        _ => return DEFAULT_ROUTE,
    };

    RouteProfile {
        base_price,
        minutes,
    }
}

fn sorted_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b { (a, b) } else { (b, a) }
}

#[derive(Debug, Clone, Copy)]
pub struct CatalogHotel {
    pub name: &'static str,
    pub price: f64,
    pub rating: f64,
    pub location: &'static str,
}

const fn hotel(name: &'static str, price: f64, rating: f64, location: &'static str) -> CatalogHotel {
    CatalogHotel {
        name,
        price,
        rating,
        location,
    }
}

static ISTANBUL: [CatalogHotel; 5] = [
    hotel("Grand Hyatt Istanbul", 180.0, 4.7, "Beyoglu, Istanbul"),
    hotel("Hilton Istanbul Bosphorus", 165.0, 4.5, "Besiktas, Istanbul"),
    hotel("Sultan Ahmet Palace Hotel", 95.0, 4.3, "Sultanahmet, Istanbul"),
    hotel("Ibis Istanbul Taksim", 75.0, 4.0, "Taksim, Istanbul"),
    hotel("The Marmara Taksim", 140.0, 4.4, "Taksim Square, Istanbul"),
];

static PARIS: [CatalogHotel; 5] = [
    hotel("Hotel Le Marais", 220.0, 4.6, "Le Marais, Paris"),
    hotel("Pullman Paris Tour Eiffel", 280.0, 4.5, "7th Arr., Paris"),
    hotel("Ibis Paris Montmartre", 95.0, 4.0, "Montmartre, Paris"),
    hotel("Hotel des Arts Montmartre", 130.0, 4.3, "18th Arr., Paris"),
    hotel("Generator Paris", 55.0, 3.8, "10th Arr., Paris"),
];

static LONDON: [CatalogHotel; 5] = [
    hotel("Hilton London Tower Bridge", 180.0, 4.4, "Tower Bridge, London"),
    hotel("Premier Inn London City", 95.0, 4.1, "City of London"),
    hotel("The Hoxton Shoreditch", 165.0, 4.5, "Shoreditch, London"),
    hotel("Generator London", 50.0, 3.8, "Russell Square, London"),
    hotel("citizenM London Bankside", 145.0, 4.4, "Bankside, London"),
];

static DUBAI: [CatalogHotel; 5] = [
    hotel("JW Marriott Marquis", 220.0, 4.6, "Business Bay, Dubai"),
    hotel("Rove Downtown", 95.0, 4.3, "Downtown Dubai"),
    hotel("Premier Inn Dubai", 65.0, 4.0, "Ibn Battuta, Dubai"),
    hotel("Atlantis The Palm", 380.0, 4.7, "Palm Jumeirah, Dubai"),
    hotel("Hilton Dubai Al Habtoor City", 160.0, 4.4, "Dubai Marina"),
];

static FRANKFURT: [CatalogHotel; 5] = [
    hotel("Marriott Frankfurt City Center", 155.0, 4.4, "Sachsenhausen, Frankfurt"),
    hotel("Motel One Frankfurt-Römer", 89.0, 4.3, "Römer, Frankfurt"),
    hotel("Hilton Frankfurt City Centre", 175.0, 4.5, "City Centre, Frankfurt"),
    hotel("Generator Frankfurt", 45.0, 3.9, "Sachsenhausen, Frankfurt"),
    hotel("Steigenberger Frankfurter Hof", 280.0, 4.6, "Kaiserplatz, Frankfurt"),
];

static BERLIN: [CatalogHotel; 5] = [
    hotel("Hotel Adlon Kempinski", 320.0, 4.8, "Mitte, Berlin"),
    hotel("Radisson Blu Berlin", 150.0, 4.4, "Alexanderplatz, Berlin"),
    hotel("Motel One Berlin Hackescher Markt", 85.0, 4.2, "Mitte, Berlin"),
    hotel("Generator Berlin Mitte", 45.0, 3.9, "Mitte, Berlin"),
    hotel("Michelberger Hotel", 130.0, 4.5, "Friedrichshain, Berlin"),
];

/// Named hotels for a destination code, if the city is in the catalog
#[must_use]
pub fn city_hotels(destination: &str) -> Option<&'static [CatalogHotel]> {
    match destination {
        "IST" => Some(&ISTANBUL[..]),
        "CDG" | "PAR" => Some(&PARIS[..]),
        "LHR" => Some(&LONDON[..]),
        "DXB" => Some(&DUBAI[..]),
        "FRA" => Some(&FRANKFURT[..]),
        "BER" => Some(&BERLIN[..]),
        _ => None,
    }
}

/// Generic entries as (name, price, rating, district); the district is joined with
/// the destination code
pub const GENERIC_HOTELS: [(&str, f64, f64, &str); 5] = [
    ("Grand City Hotel", 150.0, 4.5, "City Center"),
    ("Business Inn", 95.0, 4.2, "Business District"),
    ("Boutique Residence", 120.0, 4.4, "Arts District"),
    ("Economy Suites", 65.0, 3.9, "Near Airport"),
    ("Luxury Collection", 240.0, 4.7, "Historic Center"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_are_symmetric() {
        assert_eq!(route_profile("TAS", "IST"), route_profile("IST", "TAS"));
        assert_eq!(route_profile("LHR", "CDG").base_price, 80.0);
        assert_eq!(route_profile("CDG", "LHR").minutes, 75);
        assert_eq!(route_profile("JFK", "LHR").minutes, 480);
    }

    #[test]
    fn test_unknown_route_uses_default() {
        assert_eq!(route_profile("SIN", "BKK"), DEFAULT_ROUTE);
    }

    #[test]
    fn test_airline_profiles_cover_nonstop_and_connections() {
        assert!(AIRLINES.iter().any(|a| a.stops == 0));
        assert!(AIRLINES.iter().any(|a| a.stops == 1));
    }

    #[test]
    fn test_every_city_list_has_five_hotels() {
        for code in ["IST", "CDG", "PAR", "LHR", "DXB", "FRA", "BER"] {
            assert_eq!(city_hotels(code).map(<[_]>::len), Some(5), "{code}");
        }
        assert!(city_hotels("TAS").is_none());
    }
}
