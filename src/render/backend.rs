use crate::{
    assets::store::PreparedAssetStore,
    foundation::error::{DeckError, DeckResult},
    scene::model::Scene,
};

/// One rendered view in premultiplied RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// Backend configuration shared by all render paths.
#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// Base clear color under the scene background (RGBA8, straight alpha).
    pub clear_rgba: Option<[u8; 4]>,
    /// Preferred text family; falls back to the generic system stack.
    pub font_family: Option<String>,
}

/// A rasterizer turning scenes into frames.
pub trait RenderBackend {
    fn render_scene(
        &mut self,
        scene: &Scene,
        assets: &PreparedAssetStore,
    ) -> DeckResult<FrameRGBA>;

    /// Settings a parallel render path can use to build per-worker backends.
    fn worker_render_settings(&self) -> Option<RenderSettings> {
        None
    }
}

/// Available rasterizer implementations.
#[derive(Clone, Copy, Debug)]
pub enum BackendKind {
    Cpu,
}

pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> DeckResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(
            settings.clone(),
        ))),
        #[allow(unreachable_patterns)]
        _ => Err(DeckError::render("requested backend is not available")),
    }
}
