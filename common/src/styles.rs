//! Pre-computed static text and primitive styles.
//!
//! `MonoTextStyle`, `TextStyle` and `PrimitiveStyle` are `const`-constructible
//! in embedded-graphics 0.8, so every style the screens use is built at
//! compile time.
//!
//! Text positions on the screens refer to the top-left corner of the line
//! ([`TOP_LEFT`]), which keeps the page layouts in plain pixel rows.

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::primitives::PrimitiveStyle;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use profont::PROFONT_7_POINT;

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Left-aligned text positioned by its top edge.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

/// Centered text positioned by its middle. Used for placeholders.
pub const CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

// =============================================================================
// Pre-computed Styles
// =============================================================================

/// Regular lit text.
pub const TEXT_STYLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&PROFONT_7_POINT, BinaryColor::On);

/// Small lit text for dense pages (per-core CPU, memory details).
pub const DENSE_STYLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);

/// Filled usage bar.
pub const BAR_FILL: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_fill(BinaryColor::On);

/// Outline of a usage bar's full extent.
pub const BAR_OUTLINE: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
