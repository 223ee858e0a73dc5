use crate::model::{FuelType, Vehicle};

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Render the whole collection, in sequence order.
///
/// The layout is fixed: two-space indentation, one leaf tag per line and no
/// newline after the closing `</vehicles>`.
pub fn to_document(vehicles: &[Vehicle]) -> String {
    let mut xml = String::with_capacity(64 + vehicles.len() * 320);
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str("<vehicles>\n");

    for vehicle in vehicles {
        write_vehicle(&mut xml, vehicle);
    }

    xml.push_str("</vehicles>");
    xml
}

fn write_vehicle(xml: &mut String, v: &Vehicle) {
    xml.push_str(&format!(
        concat!(
            "  <vehicle>\n",
            "    <id>{}</id>\n",
            "    <name>{}</name>\n",
            "    <coordinates>\n",
            "      <x>{}</x>\n",
            "      <y>{}</y>\n",
            "    </coordinates>\n",
            "    <creationDate>{}</creationDate>\n",
            "    <enginePower>{}</enginePower>\n",
            "    <capacity>{}</capacity>\n",
            "    <type>{}</type>\n",
            "    <fuelType>{}</fuelType>\n",
            "  </vehicle>\n",
        ),
        v.id(),
        escape_xml(v.name()),
        format_real(v.coordinates().x()),
        v.coordinates().y(),
        v.creation_date().format("%Y-%m-%d"),
        format_real(v.engine_power()),
        format_real(v.capacity()),
        v.vehicle_type(),
        FuelType::display_optional(v.fuel_type()),
    ));
}

/// Shortest representation that parses back to the same value (`10.0`, `0.1`)
pub fn format_real(value: f64) -> String {
    format!("{:?}", value)
}

/// Escape markup characters; `&` goes first so nothing is escaped twice
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Inverse of [`escape_xml`]; `&amp;` goes last
pub fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinates, VehicleDraft, VehicleType};
    use chrono::NaiveDate;

    #[test]
    fn test_escape_order() {
        assert_eq!(escape_xml("a&b"), "a&amp;b");
        assert_eq!(escape_xml("<\"Tom's\">"), "&lt;&quot;Tom&apos;s&quot;&gt;");
        assert_eq!(escape_xml("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_unescape_reverses_escape() {
        for text in ["plain", "a&b", "&lt;", "<tag attr=\"v\">'x'</tag>", "&amp;amp;"] {
            assert_eq!(unescape_xml(&escape_xml(text)), text);
        }
    }

    #[test]
    fn test_format_real() {
        assert_eq!(format_real(10.0), "10.0");
        assert_eq!(format_real(0.1), "0.1");
        assert_eq!(format_real(-3.25), "-3.25");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(
            to_document(&[]),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<vehicles>\n</vehicles>"
        );
    }

    #[test]
    fn test_vehicle_layout() {
        let draft = VehicleDraft::new(
            "R&D <car>",
            Coordinates::new(10.0, 2).unwrap(),
            5.0,
            3.5,
            VehicleType::Car,
        );
        let vehicle =
            Vehicle::restore(1, NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(), draft).unwrap();

        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<vehicles>\n  <vehicle>\n    <id>1</id>\n    <name>R&amp;D &lt;car&gt;</name>\n    <coordinates>\n      <x>10.0</x>\n      <y>2</y>\n    </coordinates>\n    <creationDate>2024-05-17</creationDate>\n    <enginePower>5.0</enginePower>\n    <capacity>3.5</capacity>\n    <type>CAR</type>\n    <fuelType>null</fuelType>\n  </vehicle>\n</vehicles>";
        assert_eq!(to_document(&[vehicle]), expected);
    }
}
