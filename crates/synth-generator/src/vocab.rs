//! Fixed reference vocabularies.

pub const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Daniel", "Nancy", "Matthew", "Lisa", "Anthony", "Betty", "Mark",
    "Margaret", "Steven", "Sandra", "Paul", "Ashley", "Andrew", "Emily", "Joshua", "Donna",
    "Kenji", "Amara", "Luca", "Sofia", "Mateo", "Aisha", "Noah", "Olivia", "Liam", "Emma",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
    "Scott", "Nguyen", "Hill", "Flores", "Green", "Adams", "Nelson", "Baker", "Hall", "Rivera",
];

pub const EMAIL_DOMAINS: &[&str] = &[
    "example.com", "example.org", "example.net", "mail.test", "inbox.test", "corp.test",
];

pub const TLDS: &[&str] = &["com", "org", "net", "io", "dev", "co", "app", "info"];

pub const CITIES: &[&str] = &[
    "Springfield", "Riverside", "Franklin", "Greenville", "Bristol", "Clinton", "Fairview",
    "Salem", "Madison", "Georgetown", "Arlington", "Ashland", "Dover", "Oxford", "Jackson",
    "Burlington", "Manchester", "Milton", "Newport", "Auburn", "Dayton", "Lexington",
];

pub const COUNTRIES: &[&str] = &[
    "United States", "Canada", "Mexico", "Brazil", "Argentina", "United Kingdom", "Ireland",
    "France", "Germany", "Spain", "Portugal", "Italy", "Netherlands", "Sweden", "Norway",
    "Poland", "Japan", "South Korea", "India", "Australia", "New Zealand", "South Africa",
    "Nigeria", "Kenya", "Egypt",
];

pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "CA", "CO", "CT", "FL", "GA", "IL", "IN", "MA", "MI", "MN", "NY", "NC",
    "OH", "OR", "PA", "TX", "VA", "WA", "WI",
];

pub const STREET_NAMES: &[&str] = &[
    "Main", "Oak", "Pine", "Maple", "Cedar", "Elm", "Washington", "Lake", "Hill", "Park",
    "Sunset", "Highland", "Church", "Mill", "River", "Spring", "Ridge", "Meadow",
];

pub const STREET_SUFFIXES: &[&str] = &["St", "Ave", "Blvd", "Rd", "Ln", "Dr", "Ct", "Way", "Pl"];

pub const COMPANY_WORDS: &[&str] = &[
    "Acme", "Globex", "Initech", "Umbrella", "Stark", "Wayne", "Vandelay", "Hooli", "Soylent",
    "Cyberdyne", "Tyrell", "Wonka", "Aperture", "Gringotts", "Oceanic", "Massive", "Pied Piper",
];

pub const COMPANY_SUFFIXES: &[&str] = &["Inc", "LLC", "Ltd", "Group", "Corp", "Holdings", "Labs"];

pub const JOB_TITLES: &[&str] = &[
    "Software Engineer", "Data Analyst", "Product Manager", "Accountant", "Nurse",
    "Sales Representative", "Marketing Manager", "Graphic Designer", "Teacher", "Mechanic",
    "Pharmacist", "Architect", "Electrician", "Operations Manager", "HR Specialist",
    "Customer Support Agent", "Financial Advisor", "Project Coordinator",
];

pub const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in",
    "reprehenderit", "voluptate", "velit", "esse", "cillum", "fugiat", "nulla", "pariatur",
];

pub const URL_PATHS: &[&str] = &[
    "", "about", "products", "blog", "contact", "docs", "pricing", "careers", "news", "help",
];

pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Mobile/15E148",
    "curl/8.6.0",
];

pub const AIRCRAFT_TYPES: &[&str] = &[
    "Airbus A220-300", "Airbus A319", "Airbus A320neo", "Airbus A321neo", "Airbus A330-300",
    "Airbus A350-900", "Airbus A380-800", "Boeing 737-800", "Boeing 737 MAX 8", "Boeing 747-8",
    "Boeing 767-300ER", "Boeing 777-300ER", "Boeing 787-9", "Embraer E175", "Embraer E195-E2",
    "Bombardier CRJ900", "ATR 72-600", "De Havilland Dash 8-400",
];

/// Airline names with their IATA designators.
pub const AIRLINES: &[(&str, &str)] = &[
    ("American Airlines", "AA"),
    ("Delta Air Lines", "DL"),
    ("United Airlines", "UA"),
    ("Southwest Airlines", "WN"),
    ("Alaska Airlines", "AS"),
    ("Air Canada", "AC"),
    ("British Airways", "BA"),
    ("Lufthansa", "LH"),
    ("Air France", "AF"),
    ("KLM", "KL"),
    ("Emirates", "EK"),
    ("Qatar Airways", "QR"),
    ("Singapore Airlines", "SQ"),
    ("Qantas", "QF"),
    ("Japan Airlines", "JL"),
    ("Turkish Airlines", "TK"),
];

pub const AIRPORT_CODES: &[&str] = &[
    "ATL", "LAX", "ORD", "DFW", "DEN", "JFK", "SFO", "SEA", "LAS", "MCO", "MIA", "BOS", "YYZ",
    "YVR", "LHR", "CDG", "FRA", "AMS", "MAD", "FCO", "IST", "DXB", "DOH", "SIN", "HND", "NRT",
    "ICN", "PEK", "HKG", "SYD", "MEL", "GRU", "MEX", "JNB",
];

/// Tail number prefixes per registration country.
pub const TAIL_PREFIXES: &[&str] = &["N", "C-", "G-", "D-", "F-", "JA", "VH-", "B-"];

pub const SEAT_LETTERS: &[&str] = &["A", "B", "C", "D", "E", "F", "G", "H", "J", "K"];

pub const BLOOD_TYPES: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

pub const MEDICATIONS: &[&str] = &[
    "Acetaminophen", "Albuterol", "Amlodipine", "Amoxicillin", "Atorvastatin", "Azithromycin",
    "Cetirizine", "Ciprofloxacin", "Gabapentin", "Hydrochlorothiazide", "Ibuprofen",
    "Levothyroxine", "Lisinopril", "Losartan", "Metformin", "Metoprolol", "Omeprazole",
    "Prednisone", "Sertraline", "Simvastatin", "Warfarin",
];

/// ICD-10 codes with short descriptions.
pub const ICD10_CODES: &[(&str, &str)] = &[
    ("E11.9", "Type 2 diabetes mellitus without complications"),
    ("I10", "Essential (primary) hypertension"),
    ("J06.9", "Acute upper respiratory infection, unspecified"),
    ("J45.909", "Unspecified asthma, uncomplicated"),
    ("K21.9", "Gastro-esophageal reflux disease without esophagitis"),
    ("M54.5", "Low back pain"),
    ("F41.1", "Generalized anxiety disorder"),
    ("F32.9", "Major depressive disorder, single episode, unspecified"),
    ("E78.5", "Hyperlipidemia, unspecified"),
    ("N39.0", "Urinary tract infection, site not specified"),
    ("R51.9", "Headache, unspecified"),
    ("Z00.00", "General adult medical examination without abnormal findings"),
];

pub const ALLERGIES: &[&str] = &[
    "Penicillin", "Sulfa drugs", "Aspirin", "Latex", "Peanuts", "Tree nuts", "Shellfish", "Eggs",
    "Milk", "Soy", "Wheat", "Bee stings", "Pollen", "Dust mites", "Mold", "Pet dander",
];

pub const JAVASCRIPT_SNIPPETS: &[&str] = &[
    "function() { return this.total > 100; }",
    "function() { return this.status === 'active'; }",
    "function(doc) { emit(doc._id, 1); }",
    "function(key, values) { return Array.sum(values); }",
    "function() { return new Date() > this.expiresAt; }",
];

pub const REGEX_PATTERNS: &[&str] = &[
    "^[a-z0-9._%+-]+@[a-z0-9.-]+\\.[a-z]{2,}$",
    "^\\d{3}-\\d{3}-\\d{4}$",
    "^[A-Z]{2}\\d{6}$",
    "^https?://",
    "colou?r",
    "^\\s*$",
];

pub const PG_RANGE_SUBTYPES: &[&str] = &["int4range", "int8range", "numrange", "daterange", "tsrange"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabularies_are_non_empty() {
        for list in [
            FIRST_NAMES,
            LAST_NAMES,
            EMAIL_DOMAINS,
            CITIES,
            COUNTRIES,
            WORDS,
            AIRCRAFT_TYPES,
            AIRPORT_CODES,
            BLOOD_TYPES,
            MEDICATIONS,
            ALLERGIES,
        ] {
            assert!(!list.is_empty());
        }
        assert!(AIRPORT_CODES.iter().all(|c| c.len() == 3));
    }
}
