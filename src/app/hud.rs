use bevy::prelude::*;
use bevy::ui::{AlignItems, FlexDirection, JustifyContent, Node};

use super::state::AppState;
use crate::core::events::{ResetHighScoreRequested, RestartRequested};
use crate::core::round::RoundController;
use crate::core::system::system_order::{
    configure_round_sets, RoundInputSet, RoundPresentationSet,
};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        configure_round_sets(app);
        app.add_systems(Startup, spawn_hud)
            .add_systems(Update, refresh_hud_text.in_set(RoundPresentationSet))
            .add_systems(
                Update,
                (handle_hud_buttons, paint_hud_buttons)
                    .in_set(RoundInputSet)
                    .run_if(in_state(AppState::GameOver)),
            )
            .add_systems(OnEnter(AppState::GameOver), spawn_game_over_panel)
            .add_systems(OnExit(AppState::GameOver), despawn_game_over_panel);
    }
}

#[derive(Component)]
pub struct ScoreText;
#[derive(Component)]
pub struct HighScoreText;
#[derive(Component)]
struct GameOverPanel;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudButton {
    Restart,
    ResetHighScore,
}

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.18);
const BUTTON_HOVER: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED: Color = Color::srgb(0.45, 0.1, 0.1);

/// `Score: N` while flying, two-line game-over banner once the ship got through.
pub fn score_label(controller: &RoundController) -> String {
    if controller.is_game_over() {
        format!("GAME OVER\nScore: {}", controller.score())
    } else {
        format!("Score: {}", controller.score())
    }
}

pub fn high_score_label(controller: &RoundController) -> String {
    format!("High score: {}", controller.high_score())
}

fn spawn_hud(mut commands: Commands) {
    let root = commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Px(140.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::FlexStart,
                align_items: AlignItems::Center,
                padding: UiRect::top(Val::Px(16.0)),
                row_gap: Val::Px(6.0),
                ..default()
            },
            Name::new("hud"),
        ))
        .id();

    commands.entity(root).with_children(|p| {
        p.spawn((
            ScoreText,
            Text::new("Score: 0"),
            TextFont {
                font_size: 30.0,
                ..default()
            },
            TextColor(Color::WHITE),
            TextLayout::new_with_justify(JustifyText::Center),
        ));
        p.spawn((
            HighScoreText,
            Text::new("High score: 0"),
            TextFont {
                font_size: 18.0,
                ..default()
            },
            TextColor(Color::srgb(0.7, 0.7, 0.7)),
        ));
    });
}

fn refresh_hud_text(
    controller: Res<RoundController>,
    mut q_score: Query<&mut Text, (With<ScoreText>, Without<HighScoreText>)>,
    mut q_high: Query<&mut Text, (With<HighScoreText>, Without<ScoreText>)>,
) {
    if !controller.is_changed() {
        return;
    }
    if let Ok(mut text) = q_score.single_mut() {
        let s = score_label(&controller);
        if text.as_str() != s {
            *text = Text::new(s);
        }
    }
    if let Ok(mut text) = q_high.single_mut() {
        let s = high_score_label(&controller);
        if text.as_str() != s {
            *text = Text::new(s);
        }
    }
}

fn spawn_game_over_panel(mut commands: Commands) {
    let root = commands
        .spawn((
            GameOverPanel,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(12.0),
                ..default()
            },
        ))
        .id();

    commands.entity(root).with_children(|p| {
        for (kind, label) in [
            (HudButton::Restart, "Restart"),
            (HudButton::ResetHighScore, "Reset high score"),
        ] {
            p.spawn((
                Button,
                kind,
                Node {
                    width: Val::Px(240.0),
                    height: Val::Px(56.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                BackgroundColor(BUTTON_IDLE),
            ))
            .with_children(|b| {
                b.spawn((
                    Text::new(label),
                    TextFont {
                        font_size: 22.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            });
        }
    });
}

fn despawn_game_over_panel(mut commands: Commands, q_root: Query<Entity, With<GameOverPanel>>) {
    for e in &q_root {
        commands.entity(e).despawn();
    }
}

fn handle_hud_buttons(
    q: Query<(&Interaction, &HudButton), Changed<Interaction>>,
    mut restart: EventWriter<RestartRequested>,
    mut reset: EventWriter<ResetHighScoreRequested>,
) {
    for (interaction, button) in &q {
        if *interaction != Interaction::Pressed {
            continue;
        }
        info!(target: "hud", "{button:?} pressed");
        match button {
            HudButton::Restart => {
                restart.write(RestartRequested);
            }
            HudButton::ResetHighScore => {
                reset.write(ResetHighScoreRequested);
            }
        }
    }
}

fn paint_hud_buttons(
    mut q: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<HudButton>)>,
) {
    for (interaction, mut bg) in &mut q {
        *bg = BackgroundColor(match interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVER,
            Interaction::None => BUTTON_IDLE,
        });
    }
}
