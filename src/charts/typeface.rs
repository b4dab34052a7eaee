use std::sync::OnceLock;

use fontdb::Database;
use plotters::style::{register_font, FontStyle};
use printpdf::BuiltinFont;
use tracing::{debug, warn};

/// Family name chart text is drawn with.
pub(super) const FONT_FAMILY: &str = "sans-serif";

const PREFERRED_FAMILIES: [&str; 6] = [
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Arial",
    "Helvetica",
    "FreeSans"
];

static TYPEFACE_REGISTERED: OnceLock<bool> = OnceLock::new();

/// Whether chart text can be drawn.
///
/// The first call registers a typeface with the plotting backend: a preferred system
/// font when one is installed, otherwise the Helvetica face compiled into the binary.
pub fn labels_available() -> bool {
    *TYPEFACE_REGISTERED.get_or_init(|| register_system_typeface() || register_bundled_typeface())
}

fn register_system_typeface() -> bool {
    let mut database = Database::new();
    database.load_system_fonts();

    let Some(face) = PREFERRED_FAMILIES.iter().find_map(|wanted| {
        database.faces().find(|face| {
            face.index == 0 && face.families.iter().any(|(family, _)| family == wanted)
        })
    }) else {
        debug!("No preferred system font found; using the bundled typeface");
        return false;
    };

    let family = face.families.first().map(|(family, _)| family.clone()).unwrap_or_default();

    match database.with_face_data(face.id, |data, _| data.to_vec()) {
        Some(data) => register(data, &family),
        None => {
            warn!("Font [{family}] could not be read; using the bundled typeface");
            false
        }
    }
}

/// Registers the Helvetica face that ships inside the PDF crate, so chart text never
/// depends on the host.
pub(super) fn register_bundled_typeface() -> bool {
    register(BuiltinFont::Helvetica.get_subset_font().bytes, "Helvetica (bundled)")
}

fn register(data: Vec<u8>, family: &str) -> bool {
    // The plotting backend keeps registered fonts for the life of the process.
    let data: &'static [u8] = Box::leak(data.into_boxed_slice());

    match register_font(FONT_FAMILY, FontStyle::Normal, data) {
        Ok(()) => {
            debug!("Chart text uses font [{family}]");
            true
        }
        Err(_) => {
            warn!("Font [{family}] is not usable for charts");
            false
        }
    }
}
