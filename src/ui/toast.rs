//! Transient toast notices at the bottom of the screen. A new toast
//! replaces whatever is currently showing.

use bevy::prelude::*;

use crate::shared::ToastEvent;

#[derive(Component)]
pub struct Toast {
    timer: Timer,
}

pub fn show_toasts(
    mut commands: Commands,
    mut events: EventReader<ToastEvent>,
    existing: Query<Entity, With<Toast>>,
) {
    for event in events.read() {
        for entity in existing.iter() {
            commands.entity(entity).despawn_recursive();
        }
        commands.spawn((
            Toast {
                timer: Timer::from_seconds(event.duration_secs, TimerMode::Once),
            },
            Text::new(event.message.clone()),
            TextFont {
                font_size: 16.0,
                ..default()
            },
            TextColor(Color::srgb(1.0, 0.95, 0.7)),
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(16.0),
                left: Val::Percent(30.0),
                right: Val::Percent(30.0),
                ..default()
            },
        ));
    }
}

pub fn expire_toasts(
    time: Res<Time>,
    mut commands: Commands,
    mut toasts: Query<(Entity, &mut Toast)>,
) {
    for (entity, mut toast) in toasts.iter_mut() {
        if toast.timer.tick(time.delta()).finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}
