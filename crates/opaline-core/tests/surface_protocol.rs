// Copyright 2026 the Opaline authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use opaline_core::math::Extent2D;
use opaline_core::surface::traits::{
    BlendMode, ContentRenderer, DirectDispatchParams, DisplayCommandSource, DisplayList, Picture,
    PresentableTarget, PresentationContext, RenderTarget, TargetDescriptor,
};
use opaline_core::surface::{
    ContentError, DispatchMode, GpuSurface, SurfaceConfig, SurfaceError, SubmitInfo, TargetError,
};
use std::any::Any;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// --- Test Setup: recording collaborator doubles ---

/// Flags shared between a target and the test body, surviving the target's
/// consumption.
#[derive(Debug, Default)]
struct TargetProbe {
    presented: AtomicBool,
    released_unpresented: AtomicBool,
}

#[derive(Debug)]
struct TestRenderTarget {
    extent: Extent2D,
}

impl RenderTarget for TestRenderTarget {
    fn descriptor(&self) -> TargetDescriptor {
        TargetDescriptor {
            extent: self.extent,
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Debug)]
struct TestTarget {
    destination: TestRenderTarget,
    probe: Arc<TargetProbe>,
}

impl TestTarget {
    fn new(extent: Extent2D, probe: Arc<TargetProbe>) -> Self {
        Self {
            destination: TestRenderTarget { extent },
            probe,
        }
    }
}

impl PresentableTarget for TestTarget {
    fn descriptor(&self) -> TargetDescriptor {
        self.destination.descriptor()
    }

    fn render_target(&mut self) -> &mut dyn RenderTarget {
        &mut self.destination
    }

    fn present(self: Box<Self>) -> Result<(), TargetError> {
        self.probe.presented.store(true, Ordering::SeqCst);
        Ok(())
    }
}

impl Drop for TestTarget {
    fn drop(&mut self) {
        if !self.probe.presented.load(Ordering::SeqCst) {
            self.probe
                .released_unpresented
                .store(true, Ordering::SeqCst);
        }
    }
}

#[derive(Debug)]
struct TestContext {
    valid: bool,
    exhausted: bool,
    extent: Extent2D,
    acquire_count: AtomicUsize,
    probe: Arc<TargetProbe>,
}

impl TestContext {
    fn new(extent: Extent2D) -> Self {
        Self {
            valid: true,
            exhausted: false,
            extent,
            acquire_count: AtomicUsize::new(0),
            probe: Arc::new(TargetProbe::default()),
        }
    }

    fn invalid() -> Self {
        Self {
            valid: false,
            ..Self::new(Extent2D::new(1, 1))
        }
    }

    fn exhausted(extent: Extent2D) -> Self {
        Self {
            exhausted: true,
            ..Self::new(extent)
        }
    }

    fn acquires(&self) -> usize {
        self.acquire_count.load(Ordering::SeqCst)
    }
}

impl PresentationContext for TestContext {
    fn is_valid(&self) -> bool {
        self.valid
    }

    fn acquire_next_target(&self) -> Result<Box<dyn PresentableTarget>, TargetError> {
        self.acquire_count.fetch_add(1, Ordering::SeqCst);
        if self.exhausted {
            return Err(TargetError::Exhausted);
        }
        Ok(Box::new(TestTarget::new(self.extent, self.probe.clone())))
    }
}

/// One recorded render: the cull rect it was clipped to, a digest of the
/// commands that reached the destination, and the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OutputRecord {
    cull_rect: Extent2D,
    digest: u64,
}

#[derive(Debug, Default)]
struct TestContentRenderer {
    valid: bool,
    outputs: Mutex<Vec<OutputRecord>>,
    text_collect_count: AtomicUsize,
    render_picture_count: AtomicUsize,
    dispatch_count: AtomicUsize,
    transient_buffers_dirty: AtomicBool,
    glyph_cache_dirty: AtomicBool,
    last_dispatch_params: Mutex<Option<DirectDispatchParams>>,
}

impl TestContentRenderer {
    fn new() -> Self {
        Self {
            valid: true,
            ..Self::default()
        }
    }

    fn invalid() -> Self {
        Self::default()
    }

    fn outputs(&self) -> Vec<OutputRecord> {
        self.outputs.lock().unwrap().clone()
    }

    fn list_digest(list: &dyn DisplayList) -> u64 {
        list.as_any()
            .downcast_ref::<TestDisplayList>()
            .expect("content renderer handed a foreign display list")
            .digest
    }
}

impl ContentRenderer for TestContentRenderer {
    fn is_valid(&self) -> bool {
        self.valid
    }

    fn record_picture(
        &self,
        list: &dyn DisplayList,
        cull_rect: Extent2D,
    ) -> Result<Picture, ContentError> {
        // Dirty the per-frame scratch state; rendering must clean it up at
        // the frame boundary.
        self.transient_buffers_dirty.store(true, Ordering::SeqCst);
        Ok(Picture::new(cull_rect, Arc::new(Self::list_digest(list))))
    }

    fn render_picture(
        &self,
        picture: &Picture,
        destination: &mut dyn RenderTarget,
        reset_host_buffer: bool,
    ) -> Result<(), ContentError> {
        self.render_picture_count.fetch_add(1, Ordering::SeqCst);
        let digest = *picture
            .payload::<u64>()
            .ok_or_else(|| ContentError::Backend("foreign picture payload".to_string()))?;
        assert_eq!(picture.bounds(), destination.descriptor().extent);
        self.outputs.lock().unwrap().push(OutputRecord {
            cull_rect: picture.bounds(),
            digest,
        });
        if reset_host_buffer {
            self.transient_buffers_dirty.store(false, Ordering::SeqCst);
        }
        Ok(())
    }

    fn collect_text_frames(&self, _list: &dyn DisplayList, _cull_rect: Extent2D) {
        self.text_collect_count.fetch_add(1, Ordering::SeqCst);
        self.glyph_cache_dirty.store(true, Ordering::SeqCst);
    }

    fn dispatch_list(
        &self,
        list: &dyn DisplayList,
        destination: &mut dyn RenderTarget,
        params: &DirectDispatchParams,
    ) -> Result<(), ContentError> {
        self.dispatch_count.fetch_add(1, Ordering::SeqCst);
        self.transient_buffers_dirty.store(true, Ordering::SeqCst);
        assert_eq!(params.cull_rect, destination.descriptor().extent);
        *self.last_dispatch_params.lock().unwrap() = Some(*params);
        self.outputs.lock().unwrap().push(OutputRecord {
            cull_rect: params.cull_rect,
            digest: Self::list_digest(list),
        });
        Ok(())
    }

    fn reset_transient_buffers(&self) {
        self.transient_buffers_dirty.store(false, Ordering::SeqCst);
    }

    fn reset_glyph_atlas(&self) {
        self.glyph_cache_dirty.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug)]
struct TestDisplayList {
    digest: u64,
    backdrop_filter: bool,
    max_blend: BlendMode,
}

impl DisplayList for TestDisplayList {
    fn root_has_backdrop_filter(&self) -> bool {
        self.backdrop_filter
    }

    fn max_root_blend_mode(&self) -> BlendMode {
        self.max_blend
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct TestSource {
    list: Option<Arc<dyn DisplayList>>,
}

impl TestSource {
    fn with_digest(digest: u64) -> Self {
        Self {
            list: Some(Arc::new(TestDisplayList {
                digest,
                backdrop_filter: false,
                max_blend: BlendMode::SrcOver,
            })),
        }
    }

    fn unresolvable() -> Self {
        Self { list: None }
    }
}

impl DisplayCommandSource for TestSource {
    fn resolve(&self) -> Option<Arc<dyn DisplayList>> {
        self.list.clone()
    }
}

fn make_surface(
    context: Arc<TestContext>,
    content: Arc<TestContentRenderer>,
    mode: DispatchMode,
) -> GpuSurface {
    let _ = env_logger::builder().is_test(true).try_init();
    GpuSurface::new(
        context,
        content,
        SurfaceConfig {
            dispatch_mode: mode,
        },
    )
}

// --- Construction / validity ---

#[test]
fn invalid_context_yields_inert_surface() {
    let context = Arc::new(TestContext::invalid());
    let content = Arc::new(TestContentRenderer::new());
    let surface = make_surface(context.clone(), content, DispatchMode::DirectPicture);

    assert!(!surface.is_valid());
    for size in [
        Extent2D::new(1, 1),
        Extent2D::new(1920, 1080),
        Extent2D::new(0, 0),
    ] {
        assert!(matches!(
            surface.acquire_frame(size),
            Err(SurfaceError::InvalidBackend(_))
        ));
    }
    assert_eq!(context.acquires(), 0);
}

#[test]
fn invalid_content_renderer_fails_closed() {
    let context = Arc::new(TestContext::new(Extent2D::new(64, 64)));
    let content = Arc::new(TestContentRenderer::invalid());
    let surface = make_surface(context.clone(), content, DispatchMode::DirectPicture);

    assert!(!surface.is_valid());
    assert!(surface.content_renderer().is_none());
    assert!(surface.acquire_frame(Extent2D::new(64, 64)).is_err());
    assert_eq!(context.acquires(), 0);
}

// --- Acquisition ---

#[test]
fn acquired_frame_carries_the_requested_size() {
    let context = Arc::new(TestContext::new(Extent2D::new(800, 600)));
    let content = Arc::new(TestContentRenderer::new());
    let surface = make_surface(context.clone(), content, DispatchMode::DirectPicture);

    let requested = Extent2D::new(800, 600);
    let frame = surface.acquire_frame(requested).unwrap();
    assert_eq!(frame.size(), requested);
    assert!(frame.supports_fallback_display_list());
    assert_eq!(frame.framebuffer_info(), Default::default());
    assert_eq!(context.acquires(), 1);
}

#[test]
fn empty_frame_requests_are_rejected_without_acquisition() {
    let context = Arc::new(TestContext::new(Extent2D::new(100, 100)));
    let content = Arc::new(TestContentRenderer::new());
    let surface = make_surface(context.clone(), content, DispatchMode::DirectPicture);

    for size in [
        Extent2D::new(0, 100),
        Extent2D::new(100, 0),
        Extent2D::new(0, 0),
    ] {
        match surface.acquire_frame(size) {
            Err(SurfaceError::EmptyFrameRequest(reported)) => assert_eq!(reported, size),
            other => panic!("expected EmptyFrameRequest, got {other:?}"),
        }
    }
    assert_eq!(context.acquires(), 0);
}

#[test]
fn exhausted_backend_reports_acquisition_error() {
    let context = Arc::new(TestContext::exhausted(Extent2D::new(32, 32)));
    let content = Arc::new(TestContentRenderer::new());
    let surface = make_surface(context.clone(), content, DispatchMode::DirectPicture);

    match surface.acquire_frame(Extent2D::new(32, 32)) {
        Err(SurfaceError::Acquisition(TargetError::Exhausted)) => {}
        other => panic!("expected Acquisition(Exhausted), got {other:?}"),
    }
    // Exactly one acquisition attempt: no internal retry.
    assert_eq!(context.acquires(), 1);
}

// --- Submission ---

#[test]
fn successful_submit_renders_and_presents_once() {
    let context = Arc::new(TestContext::new(Extent2D::new(640, 480)));
    let content = Arc::new(TestContentRenderer::new());
    let surface = make_surface(context.clone(), content.clone(), DispatchMode::DirectPicture);

    let mut frame = surface.acquire_frame(Extent2D::new(640, 480)).unwrap();
    let source = TestSource::with_digest(0xfeed);

    frame.submit(&SubmitInfo::default(), &source).unwrap();

    assert!(frame.is_submitted());
    assert!(context.probe.presented.load(Ordering::SeqCst));
    assert_eq!(
        content.outputs(),
        vec![OutputRecord {
            cull_rect: Extent2D::new(640, 480),
            digest: 0xfeed,
        }]
    );
    // Frame boundary: transient state is clean for the next frame.
    assert!(!content.transient_buffers_dirty.load(Ordering::SeqCst));
}

#[test]
fn non_boundary_frame_defers_the_host_buffer_reset() {
    let context = Arc::new(TestContext::new(Extent2D::new(64, 64)));
    let content = Arc::new(TestContentRenderer::new());
    let surface = make_surface(context.clone(), content.clone(), DispatchMode::DirectPicture);

    let mut frame = surface.acquire_frame(Extent2D::new(64, 64)).unwrap();
    let info = SubmitInfo {
        frame_boundary: false,
    };
    frame.submit(&info, &TestSource::with_digest(1)).unwrap();

    assert!(content.transient_buffers_dirty.load(Ordering::SeqCst));
}

#[test]
fn unresolvable_source_fails_without_gpu_work() {
    let context = Arc::new(TestContext::new(Extent2D::new(64, 64)));
    let content = Arc::new(TestContentRenderer::new());
    let surface = make_surface(context.clone(), content.clone(), DispatchMode::DirectPicture);

    let mut frame = surface.acquire_frame(Extent2D::new(64, 64)).unwrap();
    let result = frame.submit(&SubmitInfo::default(), &TestSource::unresolvable());

    assert_eq!(result, Err(SurfaceError::CommandResolutionFailed));
    assert_eq!(content.render_picture_count.load(Ordering::SeqCst), 0);
    assert_eq!(content.dispatch_count.load(Ordering::SeqCst), 0);
    assert!(!context.probe.presented.load(Ordering::SeqCst));
    // The acquired target is released unused, not leaked.
    assert!(context.probe.released_unpresented.load(Ordering::SeqCst));
}

#[test]
fn second_submit_fails_deterministically() {
    let context = Arc::new(TestContext::new(Extent2D::new(64, 64)));
    let content = Arc::new(TestContentRenderer::new());
    let surface = make_surface(context.clone(), content.clone(), DispatchMode::DirectPicture);

    let mut frame = surface.acquire_frame(Extent2D::new(64, 64)).unwrap();
    let source = TestSource::with_digest(7);

    frame.submit(&SubmitInfo::default(), &source).unwrap();
    let second = frame.submit(&SubmitInfo::default(), &source);

    assert_eq!(second, Err(SurfaceError::AlreadySubmitted));
    assert_eq!(content.render_picture_count.load(Ordering::SeqCst), 1);
}

#[test]
fn dropping_a_frame_releases_the_target_without_presentation() {
    let context = Arc::new(TestContext::new(Extent2D::new(64, 64)));
    let content = Arc::new(TestContentRenderer::new());
    let surface = make_surface(context.clone(), content, DispatchMode::DirectPicture);

    let frame = surface.acquire_frame(Extent2D::new(64, 64)).unwrap();
    drop(frame);

    assert!(!context.probe.presented.load(Ordering::SeqCst));
    assert!(context.probe.released_unpresented.load(Ordering::SeqCst));
}

#[test]
fn submit_after_content_renderer_release_fails_without_side_effects() {
    let context = Arc::new(TestContext::new(Extent2D::new(64, 64)));
    let content = Arc::new(TestContentRenderer::new());
    let surface = make_surface(context.clone(), content, DispatchMode::DirectPicture);

    let mut frame = surface.acquire_frame(Extent2D::new(64, 64)).unwrap();
    // Tear the surface down while the frame is still in flight; the task
    // only holds a weak handle to the content renderer.
    drop(surface);

    let result = frame.submit(&SubmitInfo::default(), &TestSource::with_digest(3));
    assert_eq!(
        result,
        Err(SurfaceError::Content(ContentError::Unavailable))
    );
    assert!(!frame.is_submitted());
    assert!(!context.probe.presented.load(Ordering::SeqCst));
}

// --- Fixed capabilities ---

#[test]
fn capability_queries_are_fixed() {
    let context = Arc::new(TestContext::new(Extent2D::new(16, 16)));
    let content = Arc::new(TestContentRenderer::new());
    let surface = make_surface(context, content, DispatchMode::DirectPicture);

    // Capabilities do not drift across frames.
    for _ in 0..3 {
        let _ = surface.acquire_frame(Extent2D::new(16, 16)).unwrap();
        assert!(surface.root_transformation().is_identity());
        assert!(!surface.enable_raster_cache());
        assert!(surface.legacy_context().is_none());
        assert!(surface.make_context_current().is_ok());
    }
}

// --- Dispatch-mode equivalence ---

#[test]
fn both_dispatch_modes_produce_equivalent_output() {
    let extent = Extent2D::new(256, 128);
    let source = TestSource::with_digest(0xabcdef);

    let mut outputs = Vec::new();
    for mode in [DispatchMode::DirectPicture, DispatchMode::DirectDispatch] {
        let context = Arc::new(TestContext::new(extent));
        let content = Arc::new(TestContentRenderer::new());
        let surface = make_surface(context.clone(), content.clone(), mode);

        let mut frame = surface.acquire_frame(extent).unwrap();
        frame.submit(&SubmitInfo::default(), &source).unwrap();

        assert!(context.probe.presented.load(Ordering::SeqCst));
        outputs.push(content.outputs());
    }

    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn direct_dispatch_collects_text_and_resets_per_frame_state() {
    let context = Arc::new(TestContext::new(Extent2D::new(64, 64)));
    let content = Arc::new(TestContentRenderer::new());
    let surface = make_surface(context, content.clone(), DispatchMode::DirectDispatch);

    let source = TestSource {
        list: Some(Arc::new(TestDisplayList {
            digest: 11,
            backdrop_filter: true,
            max_blend: BlendMode::Multiply,
        })),
    };

    let mut frame = surface.acquire_frame(Extent2D::new(64, 64)).unwrap();
    frame.submit(&SubmitInfo::default(), &source).unwrap();

    assert_eq!(content.text_collect_count.load(Ordering::SeqCst), 1);
    assert_eq!(content.dispatch_count.load(Ordering::SeqCst), 1);
    assert_eq!(content.render_picture_count.load(Ordering::SeqCst), 0);
    assert!(!content.transient_buffers_dirty.load(Ordering::SeqCst));
    assert!(!content.glyph_cache_dirty.load(Ordering::SeqCst));

    let params = content.last_dispatch_params.lock().unwrap().unwrap();
    assert!(params.root_has_backdrop_filter);
    assert_eq!(params.max_root_blend_mode, BlendMode::Multiply);
    assert_eq!(params.cull_rect, Extent2D::new(64, 64));
}
