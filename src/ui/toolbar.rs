use bevy::prelude::*;

use crate::scene::PrimitiveShape;
use crate::theme::*;
use crate::tools::{
    ActiveTool, DeleteConfirmed, PanelCommand, ToolMode, ToolRequest,
};

/// What a toolbar button does when pressed.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolbarAction {
    ToggleSelectPanel,
    ToggleCreatePanel,
    Pick,
    Move,
    Rotate,
    Scale,
    Place(PrimitiveShape),
    Delete,
    ConfirmDelete,
    CancelDelete,
}

impl ToolbarAction {
    fn label(self) -> String {
        match self {
            ToolbarAction::ToggleSelectPanel => "Select".into(),
            ToolbarAction::ToggleCreatePanel => "Create".into(),
            ToolbarAction::Pick => "Pick".into(),
            ToolbarAction::Move => "Move".into(),
            ToolbarAction::Rotate => "Rotate".into(),
            ToolbarAction::Scale => "Scale".into(),
            ToolbarAction::Place(shape) => shape.display_name().into(),
            ToolbarAction::Delete => "Delete".into(),
            ToolbarAction::ConfirmDelete => "Delete".into(),
            ToolbarAction::CancelDelete => "Cancel".into(),
        }
    }

    /// The mode this button represents, for the pressed-state tint.
    fn mode(self) -> Option<ToolMode> {
        match self {
            ToolbarAction::Pick => Some(ToolMode::Selecting),
            ToolbarAction::Move => Some(ToolMode::Moving),
            ToolbarAction::Rotate => Some(ToolMode::Rotating),
            ToolbarAction::Scale => Some(ToolMode::Scaling),
            ToolbarAction::Place(_) => Some(ToolMode::Placing),
            ToolbarAction::Delete => Some(ToolMode::Deleting),
            _ => None,
        }
    }
}

/// The three externally driven panels.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelKind {
    SelectOptions,
    CreateOptions,
    DeleteTop,
}

pub fn spawn_toolbar(mut commands: Commands) {
    // Main toolbar, top left
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(32.0),
            left: Val::Px(32.0),
            flex_direction: FlexDirection::Row,
            ..default()
        })
        .with_children(|parent| {
            for action in [
                ToolbarAction::ToggleSelectPanel,
                ToolbarAction::ToggleCreatePanel,
                ToolbarAction::Delete,
            ] {
                spawn_toolbar_button(parent, action);
            }
        });

    // Foldable option panels under the toolbar, hidden until toggled
    spawn_panel(
        &mut commands,
        PanelKind::SelectOptions,
        UiRect {
            top: Val::Px(112.0),
            left: Val::Px(32.0),
            ..default()
        },
        &[
            ToolbarAction::Pick,
            ToolbarAction::Move,
            ToolbarAction::Rotate,
            ToolbarAction::Scale,
        ],
    );
    let shape_actions: Vec<ToolbarAction> = PrimitiveShape::ALL
        .into_iter()
        .map(ToolbarAction::Place)
        .collect();
    spawn_panel(
        &mut commands,
        PanelKind::CreateOptions,
        UiRect {
            top: Val::Px(112.0),
            left: Val::Px(32.0),
            ..default()
        },
        &shape_actions,
    );

    // Delete confirmation panel, top center
    spawn_panel(
        &mut commands,
        PanelKind::DeleteTop,
        UiRect {
            top: Val::Px(32.0),
            left: Val::Percent(40.0),
            ..default()
        },
        &[ToolbarAction::ConfirmDelete, ToolbarAction::CancelDelete],
    );
}

fn spawn_panel(
    commands: &mut Commands,
    kind: PanelKind,
    position: UiRect,
    actions: &[ToolbarAction],
) {
    commands
        .spawn((
            kind,
            Node {
                position_type: PositionType::Absolute,
                top: position.top,
                left: position.left,
                flex_direction: FlexDirection::Row,
                padding: UiRect::all(Val::Px(4.0)),
                ..default()
            },
            BackgroundColor(PANEL_BACKGROUND),
            BorderRadius::all(Val::Px(BUTTON_BORDER_RADIUS)),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            for action in actions {
                spawn_toolbar_button(parent, *action);
            }
        });
}

fn spawn_toolbar_button(parent: &mut ChildSpawnerCommands, action: ToolbarAction) {
    parent
        .spawn(Node {
            margin: UiRect::all(Val::Px(4.0)),
            ..default()
        })
        .with_children(|container| {
            container
                .spawn((
                    Button,
                    action,
                    Node {
                        height: Val::Px(48.0),
                        padding: UiRect::axes(Val::Px(16.0), Val::Px(8.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BorderColor(NORMAL_BUTTON_OUTLINE_COLOR),
                    BorderRadius::all(Val::Px(BUTTON_BORDER_RADIUS)),
                    BackgroundColor(NORMAL_BUTTON),
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new(action.label()),
                        TextFont {
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                });
        });
}

pub fn handle_toolbar_buttons(
    interactions: Query<(&Interaction, &ToolbarAction), (Changed<Interaction>, With<Button>)>,
    mut panels: Query<(&PanelKind, &mut Visibility)>,
    mut requests: EventWriter<ToolRequest>,
    mut confirmations: EventWriter<DeleteConfirmed>,
) {
    for (interaction, action) in &interactions {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match action {
            ToolbarAction::ToggleSelectPanel => {
                toggle_panel(&mut panels, PanelKind::SelectOptions)
            }
            ToolbarAction::ToggleCreatePanel => {
                toggle_panel(&mut panels, PanelKind::CreateOptions)
            }
            ToolbarAction::Pick => {
                requests.write(ToolRequest::Select);
            }
            ToolbarAction::Move => {
                requests.write(ToolRequest::Move);
            }
            ToolbarAction::Rotate => {
                requests.write(ToolRequest::Rotate);
            }
            ToolbarAction::Scale => {
                requests.write(ToolRequest::Scale);
            }
            ToolbarAction::Place(shape) => {
                requests.write(ToolRequest::Place(*shape));
            }
            ToolbarAction::Delete => {
                requests.write(ToolRequest::Delete);
            }
            ToolbarAction::ConfirmDelete => {
                confirmations.write(DeleteConfirmed);
            }
            ToolbarAction::CancelDelete => {
                requests.write(ToolRequest::Exit);
            }
        }
    }
}

/// Flip one foldable panel and close the other one.
fn toggle_panel(panels: &mut Query<(&PanelKind, &mut Visibility)>, kind: PanelKind) {
    for (panel, mut visibility) in panels {
        if *panel == kind {
            *visibility = match *visibility {
                Visibility::Hidden => Visibility::Visible,
                _ => Visibility::Hidden,
            };
        } else if *panel != PanelKind::DeleteTop {
            *visibility = Visibility::Hidden;
        }
    }
}

/// Panel visibility requested by the mode coordinator.
pub fn apply_panel_commands(
    mut commands: EventReader<PanelCommand>,
    mut panels: Query<(&PanelKind, &mut Visibility)>,
) {
    for command in commands.read() {
        for (panel, mut visibility) in &mut panels {
            let next = match (command, panel) {
                (PanelCommand::ShowDeleteTopPanel(show), PanelKind::DeleteTop) => Some(*show),
                // Entering or leaving a tool folds the option panels
                (
                    PanelCommand::ToolEnter | PanelCommand::ToolExit,
                    PanelKind::SelectOptions | PanelKind::CreateOptions,
                ) => Some(false),
                (PanelCommand::ToolExit, PanelKind::DeleteTop) => Some(false),
                _ => None,
            };
            if let Some(show) = next {
                *visibility = if show {
                    Visibility::Visible
                } else {
                    Visibility::Hidden
                };
            }
        }
    }
}

pub fn update_button_colors(
    active: Res<ActiveTool>,
    mut buttons: Query<
        (
            &Interaction,
            &ToolbarAction,
            &mut BackgroundColor,
            &mut BorderColor,
        ),
        With<Button>,
    >,
) {
    for (interaction, action, mut color, mut border) in &mut buttons {
        let is_active_mode = action.mode() == Some(active.0) && active.0 != ToolMode::Idle;
        match (*interaction, is_active_mode) {
            (Interaction::Pressed, _) | (_, true) => {
                *color = PRESSED_BUTTON.into();
                border.0 = PRESSED_BUTTON_OUTLINE_COLOR;
            }
            (Interaction::Hovered, false) => {
                *color = HOVERED_BUTTON.into();
                border.0 = HOVERED_BUTTON_OUTLINE_COLOR;
            }
            (Interaction::None, false) => {
                *color = NORMAL_BUTTON.into();
                border.0 = NORMAL_BUTTON_OUTLINE_COLOR;
            }
        }
    }
}
