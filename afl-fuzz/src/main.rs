use exif_fields::{decode_property, PropertyReader};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    afl::fuzz!(|data: &[u8]| {
        if let Ok(props) = exif_fields::ImageProperties::from_bytes(data.to_vec()) {
            let _ = PropertyReader::new().decode(&props);
        }

        // first two bytes select the tag id, the rest is the payload
        if let [hi, lo, payload @ ..] = data {
            let id = u16::from_be_bytes([*hi, *lo]) as u32;
            let _ = decode_property(id, payload);
        }
    });
}
