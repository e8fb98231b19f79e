use bevy::prelude::*;
use bevy_mod_imgui::prelude::*;
use drift_core::{AttractorTarget, CurveFollower, DriftConfig, SceneViewport};
use drift_physics::{PhysicsState, ResetGlyphs};

/// Debug window with follower state and scene controls.
pub struct PanelPlugin;

impl Plugin for PanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(bevy_mod_imgui::ImguiPlugin::default())
            .add_systems(Update, imgui_ui);
    }
}

fn imgui_ui(
    mut context: NonSendMut<ImguiContext>,
    physics: Res<PhysicsState>,
    viewport: Res<SceneViewport>,
    mut follower: ResMut<CurveFollower>,
    mut config: ResMut<DriftConfig>,
    targets: Query<&Transform, With<AttractorTarget>>,
    mut reset_events: MessageWriter<ResetGlyphs>,
) {
    let ui = context.ui();

    ui.window("Drift")
        .size([320.0, 220.0], Condition::FirstUseEver)
        .build(|| {
            ui.text(format!("Offset: {:.4}", follower.offset()));
            ui.text(format!("Last step: {:+.5}", follower.last_step()));
            match targets.iter().next() {
                Some(transform) => {
                    let p = transform.translation;
                    ui.text(format!("Attractor: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z));
                }
                None => ui.text("Attractor: none"),
            }
            ui.text(format!(
                "Viewport: {:.2} x {:.2}",
                viewport.width, viewport.height
            ));
            ui.text(format!("Glyph bodies: {}", physics.dynamic_body_count()));
            ui.separator();

            let mut paused = follower.paused;
            if ui.checkbox("Pause follower", &mut paused) {
                follower.paused = paused;
            }

            ui.same_line();

            let mut show_curve = config.debug.show_curve;
            if ui.checkbox("Show path", &mut show_curve) {
                config.debug.show_curve = show_curve;
            }

            if ui.button("Reset Glyphs") {
                reset_events.write(ResetGlyphs);
            }
        });
}
