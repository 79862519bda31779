use bevy::prelude::*;
use clap::Parser;
use platformer_kit::prelude::*;
use platformer_kit::{health_plugin, input_plugin};

/// Scripted demo: an attacker chips away at a player character once a second
/// until the lives run out, logging every hook along the way. Press the
/// Attack binding (J on desktop) to hit back.
#[derive(Parser, Debug, Resource)]
#[command(name = "platformer-kit", about = "health/input component demo")]
struct Args {
    /// Starting and maximum health of the player
    #[arg(long, default_value_t = 3)]
    health: i32,
    /// Lives before game over
    #[arg(long, default_value_t = 2)]
    lives: u32,
    /// Damage dealt by the attacker every hit
    #[arg(long, default_value_t = 1)]
    hit: i32,
    /// Route action queries through the touch source
    #[arg(long)]
    handheld: bool,
}

#[derive(Resource)]
struct AttackTimer(Timer);

fn main() {
    let args = Args::parse();
    let device = if args.handheld {
        DeviceKind::Handheld
    } else {
        DeviceKind::Desktop
    };

    App::new()
        .add_plugins(DefaultPlugins)
        .init_state::<GameState>()
        .add_plugins((input_plugin, health_plugin))
        .insert_resource(device)
        .insert_resource(AttackTimer(Timer::from_seconds(1.0, TimerMode::Repeating)))
        .insert_resource(args)
        .add_systems(Startup, setup_demo)
        .add_systems(
            Update,
            (player_attack_input, scripted_attacks).run_if(in_state(GameState::InGame)),
        )
        .add_systems(Update, end_demo)
        .run();
}

fn setup_demo(mut commands: Commands, args: Res<Args>) {
    let mut player = CharacterHealth::new(args.health, HealthCap::Limited(args.health))
        .with_alignment(Alignment::Player)
        .with_lives(Lives::Count(args.lives), Lives::Count(args.lives));
    player.hooks.on_injured.subscribe(|payload| {
        info!("player injured by {:?}", payload.other);
    });
    player.hooks.on_death.subscribe(|_| info!("player died"));
    player.hooks.on_respawn.subscribe(|_| info!("player respawned"));
    player
        .hooks
        .on_invulnerability_start
        .subscribe(|_| info!("mercy window armed"));
    player
        .hooks
        .on_invulnerability_end
        .subscribe(|_| info!("mercy window over"));
    player.hooks.on_game_over.subscribe(|_| info!("game over"));
    commands.spawn((Character, InputMap::default(), player, Name::new("player")));

    let mut attacker =
        CharacterHealth::new(2, HealthCap::Limited(2)).with_alignment(Alignment::Enemy);
    attacker.hooks.on_hurt.subscribe(|payload| {
        info!("attacker hurt {:?}", payload.other);
    });
    attacker.hooks.on_death.subscribe(|_| info!("attacker died"));
    commands.spawn((
        Character,
        attacker,
        Damage::new(1),
        Name::new("attacker"),
    ));
}

/// The attacker lands one scripted hit per second on the player.
fn scripted_attacks(
    time: Res<Time>,
    args: Res<Args>,
    mut timer: ResMut<AttackTimer>,
    attackers: Query<Entity, (With<Character>, With<Damage>)>,
    players: Query<Entity, (With<Character>, With<InputMap>)>,
    mut writer: MessageWriter<DamageEvent>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    for attacker in &attackers {
        for player in &players {
            writer.write(DamageEvent::new(player, attacker, args.hit));
        }
    }
}

/// Hitting the Attack binding strikes back at the attacker.
fn player_attack_input(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    touch: Res<TouchControls>,
    device: Res<DeviceKind>,
    players: Query<(Entity, &InputMap), With<Character>>,
    attackers: Query<Entity, (With<Character>, With<Damage>)>,
    mut writer: MessageWriter<DamageEvent>,
) {
    let keyboard = KeyboardSource::new(&keys, &bindings);
    for (player, map) in &players {
        let adapter = InputAdapter::new(map, *device, &*touch, &keyboard);
        if adapter.is_action_just_activated("Attack") {
            for attacker in &attackers {
                writer.write(DamageEvent::new(attacker, player, 1));
            }
        }
    }
}

fn end_demo(
    mut events: MessageReader<GameOverEvent>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<AppExit>,
) {
    for event in events.read() {
        info!("{:?} is done, rolling credits", event.entity);
        next_state.set(GameState::GameOver);
        exit.write(AppExit::Success);
    }
}
