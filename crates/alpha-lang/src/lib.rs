pub mod syntax;
pub mod runtime;
pub mod scene;
pub mod error;
pub mod config;

pub use config::{InputConfig, ObjectDefaults, PulseConfig, SessionConfig};
pub use error::{Error, ErrorKind};
pub use runtime::eval::Evaluator;
pub use runtime::value::Value;
pub use runtime::variables::Variables;
pub use scene::input::Direction;
pub use scene::{GameObject, Scene, Shape};
pub use syntax::ast::Command;
pub use syntax::parser::{parse_program, Parsed};
pub use syntax::preprocess::preprocess;
pub use syntax::splitter::{split_statements, Split};

use runtime::interpreter::Interpreter;
use scene::animation::Pulse;

// ─── Frame input ──────────────────────────────────────────────────────────────

/// Input gathered since the previous frame.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Canvas-space click, applied before any nudges.
    pub click: Option<(f64, f64)>,
    pub nudges: Vec<Direction>,
}

// ─── Session ──────────────────────────────────────────────────────────────────

/// One interpreter instance: variables, scene, selection and diagnostic log.
///
/// Lifecycle:
///   1. `session.parse(source)` wipes everything but the pulse clock, runs the
///      script and selects the first object created.
///   2. `session.tick(input)` once per frame: input, then the pulse, then the
///      collision pass. The caller renders `session.scene()` afterwards.
pub struct Session {
    config: SessionConfig,
    variables: Variables,
    scene: Scene,
    selection: Option<String>,
    diagnostics: Vec<Error>,
    pulse: Pulse,
}

impl Default for Session {
    fn default() -> Self { Self::new() }
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        let pulse = Pulse::new(config.pulse.clone());
        Self {
            config,
            variables: Variables::new(),
            scene: Scene::new(),
            selection: None,
            diagnostics: Vec::new(),
            pulse,
        }
    }

    /// Reset, then preprocess, split, parse and execute `source`.
    ///
    /// Nothing is returned: failures land in `diagnostics()`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse(&mut self, source: &str) {
        self.variables.clear();
        self.scene.clear();
        self.selection = None;
        self.diagnostics.clear();

        let parsed = parse_program(source);
        self.diagnostics.extend(parsed.errors);
        self.execute(&parsed.commands);

        self.selection = self.scene.first_name().map(str::to_string);
        tracing::debug!(
            objects = self.scene.len(),
            variables = self.variables.len(),
            diagnostics = self.diagnostics.len(),
            "script finished"
        );
    }

    /// Run already-parsed commands against the current state, without the
    /// reset `parse` performs.
    pub fn execute(&mut self, commands: &[Command]) {
        Interpreter::new(
            &mut self.variables,
            &mut self.scene,
            &self.config.defaults,
            &mut self.diagnostics,
        )
        .run(commands);
    }

    pub fn check_collisions(&mut self) {
        scene::collision::check_collisions(&mut self.scene);
    }

    /// One frame: apply input, advance the pulse on the selected object, then
    /// run the collision pass.
    pub fn tick(&mut self, input: &FrameInput) {
        if let Some((x, y)) = input.click {
            self.select_at(x, y);
        }
        for dir in &input.nudges {
            self.nudge_selected(*dir);
        }

        let target = self.selection.as_deref().and_then(|name| self.scene.get_mut(name));
        self.pulse.advance(target);

        self.check_collisions();
    }

    // ─── Selection ───────────────────────────────────────────────────────────

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// The selected object, resolved by name. `None` if nothing is selected or
    /// the name no longer exists.
    pub fn selected_object(&self) -> Option<&GameObject> {
        self.selection.as_deref().and_then(|name| self.scene.get(name))
    }

    /// Select `name` if such an object exists.
    pub fn select(&mut self, name: &str) -> bool {
        let found = self.scene.contains(name);
        if found {
            self.selection = Some(name.to_string());
        }
        found
    }

    /// Select the first object under the point. The selection is left as is
    /// when nothing is hit.
    pub fn select_at(&mut self, x: f64, y: f64) -> bool {
        match scene::input::hit_test(&self.scene, x, y) {
            Some(name) => {
                self.selection = Some(name.to_string());
                true
            }
            None => false,
        }
    }

    pub fn nudge_selected(&mut self, dir: Direction) {
        let speed = self.config.input.speed;
        if let Some(obj) = self.selection.as_deref().and_then(|name| self.scene.get_mut(name)) {
            scene::input::nudge(obj, dir, speed);
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────────

    pub fn config(&self) -> &SessionConfig { &self.config }

    pub fn scene(&self) -> &Scene { &self.scene }

    pub fn scene_mut(&mut self) -> &mut Scene { &mut self.scene }

    pub fn variables(&self) -> &Variables { &self.variables }

    pub fn diagnostics(&self) -> &[Error] { &self.diagnostics }
}
