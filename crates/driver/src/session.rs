//! The session: every piece of per-page state, advanced once per frame.

use std::collections::BTreeSet;

use stardrift_common::{ObjectId, Transform};
use stardrift_input::{InputEffect, InputEvent, InputQueue, InputTracker, Viewport};
use stardrift_kernel::Scene;
use stardrift_render::{NodeDesc, NodeHandle, Renderer};
use stardrift_tools::{ReadoutKey, ReadoutSink};

use crate::camera::CameraController;
use crate::config::{ConfigError, SessionConfig};
use crate::picker::HoverPicker;

/// Requests the session makes of its host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// Scroll the page back to the top.
    ScrollToTop,
    /// Fade out and hide the loading overlay. Sent once.
    FadeOutOverlay,
}

/// Result of one [`Session::frame`].
#[derive(Debug)]
pub struct FrameOutput<F> {
    pub frame: F,
    pub commands: Vec<HostCommand>,
}

#[derive(Debug)]
struct SceneNodes {
    starfield: NodeHandle,
    /// `objects[i]` mirrors object `i`.
    objects: Vec<NodeHandle>,
}

/// A running background scene bound to one renderer.
pub struct Session<R: Renderer> {
    config: SessionConfig,
    scene: Scene,
    input: InputTracker,
    queue: InputQueue,
    camera: CameraController,
    picker: HoverPicker,
    renderer: R,
    nodes: SceneNodes,
    started_at: Option<f64>,
    overlay_faded: bool,
    frame_count: u64,
    failed_readouts: BTreeSet<ReadoutKey>,
}

impl<R: Renderer> Session<R> {
    /// Validate `config`, generate the scene and mirror it into `renderer`.
    pub fn new(config: SessionConfig, renderer: R, viewport: Viewport) -> Result<Self, ConfigError> {
        config.validate()?;
        let scene = Scene::generate(
            &config.starfield,
            &config.objects,
            config.motion.clone(),
            config.seed,
        );
        Ok(Self::with_scene(config, scene, renderer, viewport))
    }

    /// Start a session over an existing scene.
    pub fn with_scene(config: SessionConfig, scene: Scene, mut renderer: R, viewport: Viewport) -> Self {
        renderer.resize(viewport.width, viewport.height);
        let nodes = mirror_scene(&scene, &mut renderer);
        let input = InputTracker::new(config.input.clone(), viewport);
        let camera = CameraController::new(config.camera.clone(), viewport.aspect());
        tracing::info!(
            objects = scene.object_count(),
            stars = scene.starfield().len(),
            width = viewport.width,
            height = viewport.height,
            "session started"
        );
        Self {
            config,
            scene,
            input,
            queue: InputQueue::new(),
            camera,
            picker: HoverPicker::new(),
            renderer,
            nodes,
            started_at: None,
            overlay_faded: false,
            frame_count: 0,
            failed_readouts: BTreeSet::new(),
        }
    }

    /// Queue a host event for the next frame.
    pub fn push_event(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    /// Run one frame at wall-clock time `now` (seconds).
    pub fn frame(&mut self, now: f64, readouts: &mut impl ReadoutSink) -> FrameOutput<R::Frame> {
        let _span = tracing::info_span!("frame", n = self.frame_count).entered();
        let mut commands = Vec::new();

        let started = *self.started_at.get_or_insert(now);
        if !self.overlay_faded && now - started >= self.config.overlay_fade_delay {
            self.overlay_faded = true;
            tracing::debug!(elapsed = now - started, "overlay fade requested");
            commands.push(HostCommand::FadeOutOverlay);
        }

        let events: Vec<InputEvent> = self.queue.drain().collect();
        for event in &events {
            match self.input.apply(event, now) {
                Some(InputEffect::ResetScroll) => {
                    tracing::debug!("scroll to top requested");
                    commands.push(HostCommand::ScrollToTop);
                }
                Some(InputEffect::Resized(viewport)) => self.resize(viewport),
                None => {}
            }
        }
        self.input.expire(now);

        self.camera
            .update(self.input.parallax_target(), self.input.scroll_progress());

        self.scene
            .animate(now, self.input.scroll_speed(), self.input.scroll_progress());
        self.sync_renderer();

        let ray = self.camera.camera().ray_through_ndc(self.input.pointer_ndc());
        self.picker
            .pick(&ray, &mut self.scene, &mut self.renderer, &self.nodes.objects);

        self.write_readouts(readouts);

        let frame = self.renderer.submit(self.camera.camera());
        self.frame_count += 1;
        FrameOutput { frame, commands }
    }

    fn resize(&mut self, viewport: Viewport) {
        self.camera.set_aspect(viewport.aspect());
        self.renderer.resize(viewport.width, viewport.height);
        tracing::debug!(width = viewport.width, height = viewport.height, "resized");
    }

    fn sync_renderer(&mut self) {
        let starfield = self.scene.starfield();
        let star_transform = Transform {
            rotation: starfield.rotation,
            ..Transform::default()
        };
        let results = [
            self.renderer.set_transform(self.nodes.starfield, &star_transform),
            self.renderer.set_opacity(self.nodes.starfield, starfield.opacity),
        ];
        for result in results {
            if let Err(e) = result {
                tracing::warn!(error = %e, "starfield sync failed");
            }
        }

        for (object, node) in self.scene.objects().iter().zip(&self.nodes.objects) {
            if let Err(e) = self.renderer.set_transform(*node, &object.transform) {
                tracing::warn!(object = object.id.0, error = %e, "object sync failed");
            }
        }
    }

    fn write_readouts(&mut self, sink: &mut impl ReadoutSink) {
        let progress = self.input.scroll_progress();
        let hovered = self
            .picker
            .hovered()
            .and_then(|id| self.scene.object(id))
            .map_or("None", |o| o.kind.name());

        let values = [
            (ReadoutKey::ObjectCount, self.scene.object_count().to_string()),
            (ReadoutKey::ScrollSpeed, format!("{:.1}x", self.input.scroll_speed())),
            (ReadoutKey::ScrollProgress, format!("{}%", (progress * 100.0).round())),
            (ReadoutKey::ScrollProgressBar, format!("{}%", progress * 100.0)),
            (ReadoutKey::HoveredObject, hovered.to_string()),
        ];
        for (key, value) in values {
            if let Err(e) = sink.write(key, &value) {
                // Report each missing element once, keep running
                if self.failed_readouts.insert(key) {
                    tracing::warn!(error = %e, "readout skipped");
                }
            }
        }
    }

    /// Remove every node this session added and hand the renderer back.
    pub fn teardown(mut self) -> R {
        let handles = std::iter::once(self.nodes.starfield).chain(self.nodes.objects.iter().copied());
        for node in handles {
            if let Err(e) = self.renderer.remove_node(node) {
                tracing::warn!(error = %e, "teardown");
            }
        }
        tracing::info!(frames = self.frame_count, "session ended");
        self.renderer
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn hovered(&self) -> Option<ObjectId> {
        self.picker.hovered()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Renderer node mirroring object `id`.
    pub fn object_node(&self, id: ObjectId) -> Option<NodeHandle> {
        self.nodes.objects.get(id.index()).copied()
    }
}

fn mirror_scene<R: Renderer>(scene: &Scene, renderer: &mut R) -> SceneNodes {
    let field = scene.starfield();
    let stars = field.stars();
    let starfield = renderer.add_node(NodeDesc::Points {
        positions: stars.iter().map(|s| s.position).collect(),
        colors: stars.iter().map(|s| s.color).collect(),
        sizes: stars.iter().map(|s| s.size).collect(),
        opacity: field.opacity,
    });

    let objects = scene
        .objects()
        .iter()
        .map(|object| {
            let node = renderer.add_node(NodeDesc::Mesh {
                shape: object.kind,
                color: object.color(),
                opacity: object.opacity,
                wireframe: true,
            });
            if let Err(e) = renderer.set_transform(node, &object.transform) {
                tracing::warn!(object = object.id.0, error = %e, "initial transform");
            }
            node
        })
        .collect();

    SceneNodes { starfield, objects }
}
