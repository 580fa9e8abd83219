//! Parse a CRLF-delimited TLE set file like the ones served by catalog mirrors

use satproto::*;

const STATIONS: &str = include_str!("../test_fixtures/stations.txt");

#[test]
fn stations_fixture() {
    let (rest, tle_set) = parse_tle_set(STATIONS).unwrap();
    assert_eq!(rest, "");
    assert_eq!(tle_set.len(), 3);

    let names: Vec<&str> = tle_set.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["ISS (ZARYA)", "GEO1", "GEO2"]);

    let catalog_numbers: Vec<u64> = tle_set.iter().filter_map(|t| t.catalog_number()).collect();
    assert_eq!(catalog_numbers, [25544, 37481, 39120]);

    for tle in tle_set.iter() {
        assert!(tle.line1.starts_with("1 "));
        assert!(tle.line2.starts_with("2 "));
        assert_eq!(tle.line1.len(), 69);
        assert_eq!(tle.line2.len(), 69);
    }
}

#[test]
fn payload_round_trips_through_line_delimiter() {
    let (_, tle_set) = parse_tle_set(STATIONS).unwrap();
    let iss = &tle_set[0];
    let payload = format!("{}{}{}", iss.line1, TLE_LINE_DELIMITER, iss.line2);
    let (rest, (line1, line2)) = parse_tle_lines(&payload).unwrap();
    assert_eq!(rest, "");
    assert_eq!(line1, iss.line1);
    assert_eq!(line2, iss.line2);
}
