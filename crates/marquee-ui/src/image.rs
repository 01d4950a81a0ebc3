use marquee_core::{DrawCtx, ImageHandle, LayoutCtx, Rect, Size, View, ViewBase};

/// How the image is fitted into the view bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageScale {
    /// Keep aspect ratio, fit entirely inside, centered.
    #[default]
    Fit,
    /// Fill the bounds, ignoring aspect ratio.
    Stretch,
    /// Keep aspect ratio, cover the bounds, clipped.
    Crop,
    /// Natural size, centered and clipped.
    Original,
}

/// An image decoded by the host, referenced by handle.
pub struct Image {
    base: ViewBase,
    handle: Option<ImageHandle>,
    natural: Size,
    scale: ImageScale,
    image_rect: Rect,
}

impl Image {
    pub fn new(handle: ImageHandle, natural: Size) -> Self {
        Self {
            base: ViewBase::new(),
            handle: Some(handle),
            natural,
            scale: ImageScale::default(),
            image_rect: Rect::default(),
        }
    }

    pub fn empty() -> Self {
        Self {
            base: ViewBase::new(),
            handle: None,
            natural: Size::default(),
            scale: ImageScale::default(),
            image_rect: Rect::default(),
        }
    }

    pub fn set_image(&mut self, handle: ImageHandle, natural: Size) {
        self.handle = Some(handle);
        self.natural = natural;
        self.base.invalidate();
    }

    pub fn set_scale(&mut self, scale: ImageScale) {
        self.scale = scale;
        self.base.invalidate();
    }

    /// Where the image lands after scaling, before clipping.
    pub fn image_rect(&self) -> Rect {
        self.image_rect
    }
}

fn fitted(bounds: Rect, natural: Size, scale: ImageScale) -> Rect {
    if natural.width <= 0.0 || natural.height <= 0.0 {
        return bounds;
    }
    let centered = |w: f32, h: f32| {
        Rect::new(
            bounds.x + (bounds.w - w) / 2.0,
            bounds.y + (bounds.h - h) / 2.0,
            w,
            h,
        )
    };
    match scale {
        ImageScale::Stretch => bounds,
        ImageScale::Original => centered(natural.width, natural.height),
        ImageScale::Fit | ImageScale::Crop => {
            let sx = bounds.w / natural.width;
            let sy = bounds.h / natural.height;
            let s = if scale == ImageScale::Fit { sx.min(sy) } else { sx.max(sy) };
            centered(natural.width * s, natural.height * s)
        }
    }
}

impl View for Image {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn layout(&mut self, _ctx: &LayoutCtx<'_>) {
        self.image_rect = fitted(self.base.rect(), self.natural, self.scale);
        self.base.mark_laid_out();
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_>) {
        let Some(handle) = self.handle else {
            return;
        };
        let clip = matches!(self.scale, ImageScale::Crop | ImageScale::Original);
        if clip {
            ctx.canvas.save();
            ctx.canvas.intersect_scissor(self.base.rect());
        }
        ctx.canvas.image(self.image_rect, handle, ctx.alpha());
        if clip {
            ctx.canvas.restore();
        }
    }
}
