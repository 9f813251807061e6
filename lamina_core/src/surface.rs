// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Output-surface pixel store.
//!
//! An [`OutputSurface`] owns an optional packed 32-bit pixel backing that is
//! allocated on first write and freed on destroy or on an explicit
//! clear-via-composite from the "no source" sentinel. The backing, when
//! present, is exactly `width × height` cells in row-major order.
//!
//! The `cleared` flag distinguishes "backing exists but is logically blank"
//! from "no backing": the presentation path skips punch-through drawing for
//! cleared surfaces, and the composite path zero-fills a cleared backing
//! before writing into it.

use alloc::vec;
use alloc::vec::Vec;

use crate::format::{ColorTableFormat, IndexedFormat, RgbaFormat, YcbcrFormat};
use crate::geometry::Rect;
use crate::status::{Result, Status};
use crate::video::{ColorSettings, VideoFrame};
use crate::warn_once;

/// Exclusive upper bound on surface width and height.
pub const MAX_DIMENSION: u32 = 16384;

/// Stored creation parameters of a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceParameters {
    /// Pixel format tag given at creation.
    pub format: RgbaFormat,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Borrowed view of a surface's dimensions and pixel backing.
///
/// Used as the source side of [`OutputSurface::render_from`] so that the
/// caller controls how the two surfaces are borrowed from its storage.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceView<'a> {
    /// Source width in pixels.
    pub width: u32,
    /// Source height in pixels.
    pub height: u32,
    /// Pixel backing, if the source has been written to.
    pub pixels: Option<&'a [u32]>,
}

/// A CPU-composited image buffer that can also carry a decoded video frame.
#[derive(Debug)]
pub struct OutputSurface {
    format: RgbaFormat,
    width: u32,
    height: u32,
    data: Option<Vec<u32>>,
    cleared: bool,
    video: Option<VideoFrame>,
    video_src_rect: Rect,
    video_dst_rect: Rect,
    color: ColorSettings,
    // Last settings pushed to hardware; gates the expensive enhancement
    // update in the display path.
    applied_color: ColorSettings,
}

impl OutputSurface {
    /// Creates a surface with no pixel backing yet.
    ///
    /// Fails with [`Status::InvalidSize`] when either dimension is zero or
    /// at least [`MAX_DIMENSION`].
    pub fn new(format: RgbaFormat, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 || width >= MAX_DIMENSION || height >= MAX_DIMENSION {
            return Err(Status::InvalidSize);
        }
        Ok(Self {
            format,
            width,
            height,
            data: None,
            cleared: false,
            video: None,
            video_src_rect: Rect::default(),
            video_dst_rect: Rect::default(),
            color: ColorSettings::DEFAULT,
            applied_color: ColorSettings::DEFAULT,
        })
    }

    /// Returns the stored creation parameters.
    #[must_use]
    pub const fn parameters(&self) -> SurfaceParameters {
        SurfaceParameters {
            format: self.format,
            width: self.width,
            height: self.height,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// The pixel backing, if any write has allocated it.
    #[must_use]
    pub fn pixels(&self) -> Option<&[u32]> {
        self.data.as_deref()
    }

    /// Whether the backing is logically blank.
    #[must_use]
    pub const fn is_cleared(&self) -> bool {
        self.cleared
    }

    /// Marks an existing backing as logically blank without freeing it.
    ///
    /// Called by the external video-submission path when a new frame
    /// invalidates previously composited graphics.
    pub fn mark_cleared(&mut self) {
        self.cleared = true;
    }

    /// Borrows this surface as a composite source.
    #[must_use]
    pub fn view(&self) -> SurfaceView<'_> {
        SurfaceView {
            width: self.width,
            height: self.height,
            pixels: self.data.as_deref(),
        }
    }

    /// Expands indexed pixels through a color table into the backing.
    ///
    /// Only the `{B8g8r8a8, I8A8, B8g8r8x8}` combination is implemented;
    /// any other recognized combination logs once and succeeds without
    /// touching the surface. For the supported path the destination rect
    /// must be valid for this surface and `source_pitch` must cover two
    /// bytes per destination pixel; both are checked before the backing is
    /// allocated, so a failed call leaves the surface untouched.
    ///
    /// Each destination cell takes the table entry selected by the index
    /// byte, masked to its low 24 bits, with the source alpha byte shifted
    /// into bits 24–31. Table entries beyond the given slice read as zero.
    pub fn put_bits_indexed(
        &mut self,
        source_format: IndexedFormat,
        source: &[u8],
        source_pitch: u32,
        dest_rect: Rect,
        table_format: ColorTableFormat,
        table: &[u32],
    ) -> Result<()> {
        if !dest_rect.valid_within(self.width, self.height) {
            return Err(Status::InvalidSize);
        }
        if self.format != RgbaFormat::B8g8r8a8
            || source_format != IndexedFormat::I8A8
            || table_format != ColorTableFormat::B8g8r8x8
        {
            warn_once!("put_bits_indexed: unimplemented format combination, ignoring");
            return Ok(());
        }

        let w = dest_rect.width() as usize;
        let h = dest_rect.height() as usize;
        let pitch = source_pitch as usize;
        if pitch < 2 * w {
            return Err(Status::InvalidSize);
        }
        // The last row does not need the full pitch, only its payload.
        let needed = match h {
            0 => 0,
            rows => (rows - 1) * pitch + 2 * w,
        };
        if source.len() < needed {
            return Err(Status::InvalidSize);
        }

        let width = self.width as usize;
        let height = self.height as usize;
        let data = self.data.get_or_insert_with(|| vec![0; width * height]);
        for row in 0..h {
            let src_row = &source[row * pitch..row * pitch + 2 * w];
            let dst_base = (dest_rect.y0 as usize + row) * width + dest_rect.x0 as usize;
            for (i, pair) in src_row.chunks_exact(2).enumerate() {
                let entry = table.get(usize::from(pair[0])).copied().unwrap_or(0);
                data[dst_base + i] = (entry & 0x00ff_ffff) | (u32::from(pair[1]) << 24);
            }
        }
        self.cleared = false;
        Ok(())
    }

    /// Accepts a native-format upload without performing it.
    ///
    /// Structural conformance stub: recognized, logged once, succeeds.
    pub fn put_bits_native(
        &mut self,
        _source: &[u8],
        _source_pitch: u32,
        _dest_rect: Option<Rect>,
    ) -> Result<()> {
        warn_once!("put_bits_native: unimplemented, ignoring");
        Ok(())
    }

    /// Accepts a YCbCr upload without performing it.
    ///
    /// Structural conformance stub: recognized, logged once, succeeds.
    pub fn put_bits_ycbcr(
        &mut self,
        _source_format: YcbcrFormat,
        _planes: &[&[u8]],
        _pitches: &[u32],
        _dest_rect: Option<Rect>,
    ) -> Result<()> {
        warn_once!("put_bits_ycbcr: unimplemented, ignoring");
        Ok(())
    }

    /// Frees the pixel backing, leaving the surface video-only.
    ///
    /// This is the composite-from-no-source path: the whole surface is
    /// cleared regardless of any destination rect, and no geometry is
    /// computed.
    pub fn clear_backing(&mut self) {
        self.data = None;
    }

    /// Copies a region from another surface's backing into this one.
    ///
    /// The rects may differ in size; no scaling is performed, only a
    /// top-left-aligned copy of the minimum overlap. The destination
    /// backing is lazily allocated, and zero-filled first when it exists
    /// but is logically cleared. Unsupported destinations (non-BGRA format
    /// or a source with no backing) log once and succeed without effect.
    pub fn render_from(
        &mut self,
        dest_rect: Rect,
        source: SurfaceView<'_>,
        source_rect: Rect,
    ) -> Result<()> {
        if !source_rect.valid_within(source.width, source.height)
            || !dest_rect.valid_within(self.width, self.height)
        {
            return Err(Status::InvalidSize);
        }
        let Some(src) = source.pixels else {
            warn_once!("render_output_surface: source has no backing, ignoring");
            return Ok(());
        };
        if self.format != RgbaFormat::B8g8r8a8 {
            warn_once!("render_output_surface: unimplemented destination format, ignoring");
            return Ok(());
        }

        let width = self.width as usize;
        let height = self.height as usize;
        if self.cleared
            && let Some(data) = &mut self.data
        {
            data.fill(0);
        }
        let data = self.data.get_or_insert_with(|| vec![0; width * height]);

        let w = dest_rect.width().min(source_rect.width()) as usize;
        let h = dest_rect.height().min(source_rect.height()) as usize;
        let src_width = source.width as usize;
        for row in 0..h {
            let src_base = (source_rect.y0 as usize + row) * src_width + source_rect.x0 as usize;
            let dst_base = (dest_rect.y0 as usize + row) * width + dest_rect.x0 as usize;
            data[dst_base..dst_base + w].copy_from_slice(&src[src_base..src_base + w]);
        }
        self.cleared = false;
        Ok(())
    }

    // -- Video attachment (external submission seam) ----------------------

    /// Attaches a decoded frame with its crop and placement rects.
    pub fn attach_video(&mut self, frame: VideoFrame, src_rect: Rect, dst_rect: Rect) {
        self.video = Some(frame);
        self.video_src_rect = src_rect;
        self.video_dst_rect = dst_rect;
    }

    /// The attached decoded frame, if the surface has been fed video data.
    #[must_use]
    pub const fn video(&self) -> Option<&VideoFrame> {
        self.video.as_ref()
    }

    /// Source crop rectangle of the attached frame.
    #[must_use]
    pub const fn video_src_rect(&self) -> Rect {
        self.video_src_rect
    }

    /// On-screen placement rectangle of the attached frame.
    #[must_use]
    pub const fn video_dst_rect(&self) -> Rect {
        self.video_dst_rect
    }

    // -- Color enhancement -------------------------------------------------

    /// Updates the color-enhancement parameters.
    pub fn set_color_settings(&mut self, settings: ColorSettings) {
        self.color = settings;
    }

    /// Current color-enhancement parameters.
    #[must_use]
    pub const fn color_settings(&self) -> ColorSettings {
        self.color
    }

    /// The settings to push, when they differ from the last applied ones.
    #[must_use]
    pub fn pending_color_update(&self) -> Option<ColorSettings> {
        (self.color != self.applied_color).then_some(self.color)
    }

    /// Records that the current settings reached the hardware.
    pub fn color_settings_applied(&mut self) {
        self.applied_color = self.color;
    }
}
