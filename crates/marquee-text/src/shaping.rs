use std::sync::Arc;

use ahash::AHashMap;
use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use crate::measure::{TextMeasurer, TextMetrics};
use crate::style::{FontFace, TextStyle};

const CACHE_LIMIT: usize = 4096;

#[derive(Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    text: String,
    font: u32,
    size: u32,
    line_height: u32,
    box_width: Option<u32>,
}

struct Engine {
    fs: FontSystem,
    // Family name per registered face; index 0 is the system sans-serif.
    families: Vec<Option<String>>,
    cache: AHashMap<CacheKey, TextMetrics>,
}

static ENGINE: OnceCell<Mutex<Engine>> = OnceCell::new();

fn engine() -> &'static Mutex<Engine> {
    ENGINE.get_or_init(|| {
        let fs = FontSystem::new();
        log::debug!("font database loaded with {} faces", fs.db().len());
        Mutex::new(Engine {
            fs,
            families: vec![None],
            cache: AHashMap::new(),
        })
    })
}

/// Measures with cosmic-text against the system font database plus any faces
/// registered through [`ShapingMeasurer::register_font`]. Results are cached
/// per (text, face, size, line height, box width).
#[derive(Clone, Copy, Debug, Default)]
pub struct ShapingMeasurer;

impl ShapingMeasurer {
    pub fn new() -> Self {
        Self
    }

    /// Loads a font from memory and returns the face handle to use in
    /// [`TextStyle::font`]. Returns `None` if the data holds no usable face.
    pub fn register_font(&self, data: Vec<u8>) -> Option<FontFace> {
        let mut eng = engine().lock();
        let ids = eng
            .fs
            .db_mut()
            .load_font_source(fontdb::Source::Binary(Arc::new(data)));
        let Some(&id) = ids.first() else {
            log::warn!("font data contained no loadable faces");
            return None;
        };
        let family = eng
            .fs
            .db()
            .face(id)
            .and_then(|face| face.families.first())
            .map(|(name, _)| name.clone())?;
        log::debug!("registered font family {family:?}");
        eng.families.push(Some(family));
        eng.cache.clear();
        Some(FontFace((eng.families.len() - 1) as u32))
    }

    fn shape(&self, text: &str, style: &TextStyle, box_width: Option<f32>) -> TextMetrics {
        if text.is_empty() {
            return TextMetrics::default();
        }
        let key = CacheKey {
            text: text.to_string(),
            font: style.font.0,
            size: style.size.to_bits(),
            line_height: style.line_height.to_bits(),
            box_width: box_width.map(f32::to_bits),
        };

        let mut eng = engine().lock();
        if let Some(hit) = eng.cache.get(&key) {
            return *hit;
        }

        let Engine {
            fs,
            families,
            cache,
        } = &mut *eng;
        let family = match families.get(style.font.0 as usize) {
            Some(Some(name)) => Family::Name(name.as_str()),
            _ => Family::SansSerif,
        };

        let metrics = Metrics::new(style.size, style.size * style.line_height);
        let mut buf = Buffer::new(fs, metrics);
        {
            let mut b = buf.borrow_with(fs);
            b.set_size(box_width, None);
            b.set_text(text, &Attrs::new().family(family), Shaping::Advanced, None);
            b.shape_until_scroll(true);
        }

        let mut out = TextMetrics::default();
        for run in buf.layout_runs() {
            out.width = out.width.max(run.line_w);
            out.lines += 1;
        }
        out.height = out.lines as f32 * metrics.line_height;

        if cache.len() >= CACHE_LIMIT {
            cache.clear();
        }
        cache.insert(key, out);
        out
    }
}

impl TextMeasurer for ShapingMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        self.shape(text, style, None)
    }

    fn measure_box(&self, text: &str, style: &TextStyle, box_width: f32) -> TextMetrics {
        self.shape(text, style, Some(box_width.max(0.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_measures_nothing() {
        let m = ShapingMeasurer::new();
        let style = TextStyle::new(24.0);
        assert_eq!(m.measure("", &style), TextMetrics::default());
        assert_eq!(m.measure_box("", &style, 100.0).width, 0.0);
    }

    #[test]
    fn test_repeat_measure_is_served_from_cache() {
        let m = ShapingMeasurer::new();
        let style = TextStyle::new(18.0);
        let first = m.measure("cached line", &style);
        assert!(first.lines <= 1);
        assert_eq!(m.measure("cached line", &style), first);

        let key = CacheKey {
            text: "cached line".into(),
            font: style.font.0,
            size: style.size.to_bits(),
            line_height: style.line_height.to_bits(),
            box_width: None,
        };
        assert_eq!(engine().lock().cache.get(&key), Some(&first));
    }

    #[test]
    fn test_register_rejects_garbage() {
        let m = ShapingMeasurer::new();
        assert_eq!(m.register_font(b"not a font".to_vec()), None);
    }
}
