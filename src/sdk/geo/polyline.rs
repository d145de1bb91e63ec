//! Codec for the signed-delta varint polyline format used by directions
//! providers. Each axis delta is zig-zag signed, split into 5-bit groups
//! (little endian, continuation bit 0x20) and offset by 63 into printable
//! ASCII. Values are fixed-point with five decimal places.

use super::Coordinate;

const PRECISION: f64 = 1e5;

/// Decodes an encoded polyline into its coordinate sequence.
///
/// An empty string decodes to an empty path. A varint cut off by the end of
/// the input terminates decoding at the last complete point.
pub fn decode(encoded: &str) -> Vec<Coordinate> {
    let bytes = encoded.as_bytes();
    let mut path = Vec::new();
    let mut pos = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while pos < bytes.len() {
        let Some(d_lat) = next_delta(bytes, &mut pos) else {
            break;
        };
        let Some(d_lng) = next_delta(bytes, &mut pos) else {
            break;
        };
        lat += d_lat;
        lng += d_lng;
        path.push(Coordinate::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    path
}

fn next_delta(bytes: &[u8], pos: &mut usize) -> Option<i64> {
    let mut value: i64 = 0;
    let mut shift = 0u32;
    loop {
        let chunk = i64::from(*bytes.get(*pos)?) - 63;
        *pos += 1;
        value |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }
    // Undo the zig-zag sign encoding.
    Some(if value & 1 != 0 { !(value >> 1) } else { value >> 1 })
}

/// Encodes a coordinate sequence with the standard algorithm. The inverse of
/// [`decode`] up to the 1e-5 fixed-point rounding.
pub fn encode(path: &[Coordinate]) -> String {
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in path {
        let lat = (point.latitude * PRECISION).round() as i64;
        let lng = (point.longitude * PRECISION).round() as i64;
        push_delta(lat - prev_lat, &mut out);
        push_delta(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

fn push_delta(delta: i64, out: &mut String) {
    let mut value = if delta < 0 { !(delta << 1) } else { delta << 1 };
    while value >= 0x20 {
        out.push((((value & 0x1f) | 0x20) as u8 + 63) as char);
        value >>= 5;
    }
    out.push((value as u8 + 63) as char);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // Worked example from the format documentation.
    const SIERRA: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    #[test]
    fn decodes_known_polyline() {
        let path = decode(SIERRA);
        let expected = [
            (38.5, -120.2),
            (40.7, -120.95),
            (43.252, -126.453),
        ];
        assert_eq!(path.len(), expected.len());
        for (point, (lat, lng)) in path.iter().zip(expected) {
            assert_abs_diff_eq!(point.latitude, lat, epsilon = 1e-5);
            assert_abs_diff_eq!(point.longitude, lng, epsilon = 1e-5);
        }
    }

    #[test]
    fn empty_input_decodes_to_empty_path() {
        assert!(decode("").is_empty());
    }

    #[test]
    fn encode_decode_round_trips() {
        let original = vec![
            Coordinate::new(19.0760, 72.8777),
            Coordinate::new(19.0801, 72.8902),
            Coordinate::new(19.1172, 72.9081),
            Coordinate::new(-33.86882, 151.20929),
            Coordinate::new(0.0, 0.0),
        ];
        let decoded = decode(&encode(&original));
        assert_eq!(decoded.len(), original.len());
        for (a, b) in decoded.iter().zip(&original) {
            assert_abs_diff_eq!(a.latitude, b.latitude, epsilon = 1e-5);
            assert_abs_diff_eq!(a.longitude, b.longitude, epsilon = 1e-5);
        }
    }

    #[test]
    fn known_points_encode_to_known_string() {
        let path = vec![
            Coordinate::new(38.5, -120.2),
            Coordinate::new(40.7, -120.95),
            Coordinate::new(43.252, -126.453),
        ];
        assert_eq!(encode(&path), SIERRA);
    }

    #[test]
    fn truncated_trailing_varint_is_dropped() {
        let mut encoded = encode(&[
            Coordinate::new(38.5, -120.2),
            Coordinate::new(40.7, -120.95),
        ]);
        encoded.push('_'); // start of a varint that never completes
        assert_eq!(decode(&encoded).len(), 2);
    }
}
