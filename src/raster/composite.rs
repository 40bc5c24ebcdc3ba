use crate::foundation::math::mul_div255;

/// How a drawn source pixel combines with the destination pixel.
///
/// These are the three 2D-canvas composite operations the engine needs:
/// normal painting, erase cut-out, and keep-previous-alpha re-mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CompositeMode {
    /// Standard source-over-destination (premultiplied alpha).
    SourceOver,
    /// Erase: destination survives only where the source is transparent.
    DestinationOut,
    /// Destination is kept where the source has alpha and the source fills
    /// the rest; output alpha equals source alpha. Affects the whole
    /// destination surface, like the canvas `destination-atop` mode.
    DestinationAtop,
}

pub(crate) type PremulRgba8 = [u8; 4];

/// Porter-Duff `over` on premultiplied RGBA8.
pub(crate) fn source_over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Porter-Duff `dest-out`: keep destination where the source is transparent.
pub(crate) fn destination_out(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = mul_div255(u16::from(dst[i]), inv);
    }
    out
}

/// Porter-Duff `dest-atop`: destination clipped to the source's alpha, source
/// showing through where the destination was transparent.
pub(crate) fn destination_atop(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = u16::from(src[3]);
    let inv_da = 255u16 - u16::from(dst[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = mul_div255(u16::from(dst[i]), sa)
            .saturating_add(mul_div255(u16::from(src[i]), inv_da));
    }
    out
}

/// Combine one pixel according to `mode`.
#[inline]
pub(crate) fn composite(mode: CompositeMode, dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match mode {
        CompositeMode::SourceOver => source_over(dst, src),
        CompositeMode::DestinationOut => destination_out(dst, src),
        CompositeMode::DestinationAtop => destination_atop(dst, src),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
