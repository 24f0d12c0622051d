//! Drives the gameplay core the way a game's frame loop would: a hero patrols between goblins,
//! chases and fights them, and flees when hurt.

#[macro_use]
extern crate log;

use gameplay_core::helpers::{build_config, Metronome, OrLog};
use gameplay_core::*;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

const ATTACK_RANGE: f64 = 1.5;
const SIGHT_RANGE: f64 = 8.0;

/// What the hero's brain and tactics read and write each tick
#[derive(Debug, Default)]
struct Senses {
    health: i64,
    /// Distance to the nearest living goblin, if one can be seen
    enemy_distance: Option<f64>,
    /// Direction the hero wants to move in
    heading: f64,
    strikes: u32,
}

struct Demo {
    world: World,
    events: Arc<EventBus>,
    movement: System,
    combat: System,
    brain: StateMachine<Senses>,
    tactics: BehaviorTree<Senses>,
    senses: Senses,
    hero: EntityKey,
    ticks: u64,
    max_ticks: Option<u64>,
    should_quit: Arc<AtomicBool>,
}

fn define_classes(ctx: &Context) -> CoreResult<Class> {
    let creature = ctx.classes().define_class("Creature", None)?;
    creature.define(INIT, |this, args| {
        this.set("name", args.get(0).cloned().unwrap_or_default());
        this.set("health", args.get(1).cloned().unwrap_or(Value::from(10)));
        Ok(Value::Null)
    });
    creature.define("Describe", |this, _| {
        let name = this.get_as::<String>("name")?;
        let health = this.get_as::<i64>("health")?;
        Ok(format!("{} ({} hp)", name, health).into())
    });
    let goblin = ctx.classes().define_class("Goblin", Some(&creature))?;
    let base = creature.clone();
    goblin.define(INIT, move |this, args| {
        base.invoke(INIT, this, args)?;
        this.set("greed", 3);
        Ok(Value::Null)
    });
    goblin.define("Taunt", |this, _| {
        Ok(format!("{} wants your gold", this.get_as::<String>("name")?).into())
    });
    Ok(goblin)
}

fn spawn_goblin(world: &mut World, goblin: &Class, name: &str, position: f64) -> CoreResult<()> {
    let key = world.create_entity(None)?;
    let mut creature = goblin.new_instance(&[name.into(), 4.into()])?;
    if let Some(description) = creature.call("Describe", &[]).or_log_warn("describing goblin") {
        info!("spawned {}", description);
    }
    if let Some(taunt) = creature.call("Taunt", &[]).or_log_warn("taunting") {
        info!("{}", taunt);
    }
    if let Some(entity) = world.entity_mut(key) {
        entity.add_component("position", position);
        entity.add_component("health", 4i64);
        entity.add_component("creature", creature);
    }
    Ok(())
}

fn movement_system() -> System {
    System::new("movement", |dt, entities| {
        for entity in entities.iter_mut() {
            let velocity = match entity.get_component::<f64>("velocity") {
                Some(velocity) => *velocity,
                None => continue,
            };
            if let Some(position) = entity.get_component_mut::<f64>("position") {
                *position += velocity * dt;
            }
        }
    })
}

/// Applies pending damage and reports deaths on the bus
fn combat_system(events: Arc<EventBus>) -> System {
    System::new("combat", move |_, entities| {
        for entity in entities.iter_mut() {
            let damage = match entity.remove_component("damage") {
                Some(damage) => damage.downcast_ref::<i64>().copied().unwrap_or(0),
                None => continue,
            };
            let health = match entity.get_component_mut::<i64>("health") {
                Some(health) => health,
                None => continue,
            };
            *health -= damage;
            if *health <= 0 {
                let name = entity
                    .get_component::<Instance>("creature")
                    .and_then(|creature| creature.get_as::<String>("name").ok())
                    .unwrap_or_else(|| entity.id().to_string());
                entity.add_component("dead", ());
                events.emit("died", vec![name.into()]);
            }
        }
    })
}

fn build_brain(ctx: &Context) -> StateMachine<Senses> {
    let mut brain = ctx.state_machine();
    brain
        .add_state(
            "patrol",
            StateHooks::new().on_enter(|s: &mut Senses| s.heading = 1.0),
        )
        .add_state(
            "chase",
            StateHooks::new().on_exit(|s: &mut Senses| s.heading = 0.0),
        )
        .add_state(
            "flee",
            StateHooks::new()
                .on_enter(|s: &mut Senses| s.heading = -2.0)
                .on_update(|s: &mut Senses| s.health += 1),
        )
        .add_transition("patrol", "chase", |s| {
            s.enemy_distance.map_or(false, |d| d <= SIGHT_RANGE)
        })
        .add_transition("chase", "flee", |s| s.health < 4)
        .add_transition("chase", "patrol", |s| s.enemy_distance.is_none())
        .add_transition("flee", "patrol", |s| s.health >= 8);
    brain
        .state_changed()
        .connect(|change: &StateChange| info!("hero: {}", change));
    brain
}

/// Picks what the hero does while chasing
fn build_tactics() -> BehaviorTree<Senses> {
    BehaviorTree::new(Node::selector(vec![
        Node::sequence(vec![
            Node::leaf("in range", |s: &mut Senses| match s.enemy_distance {
                Some(d) if d <= ATTACK_RANGE => Status::Success,
                _ => Status::Failure,
            }),
            Node::leaf("strike", |s: &mut Senses| {
                s.strikes += 1;
                s.heading = 0.0;
                Status::Success
            }),
        ]),
        Node::leaf("approach", |s: &mut Senses| {
            s.heading = 3.0;
            Status::Running
        }),
    ]))
}

impl Demo {
    fn new(ctx: &Context, should_quit: Arc<AtomicBool>) -> CoreResult<Self> {
        let goblin = define_classes(ctx)?;
        let mut world = ctx.world();
        let hero = world.create_entity(Some("hero"))?;
        if let Some(entity) = world.entity_mut(hero) {
            entity.add_component("position", 0.0f64);
            entity.add_component("velocity", 0.0f64);
            entity.add_component("health", 10i64);
        }
        for (i, name) in ["Grib", "Snag", "Murk"].iter().enumerate() {
            spawn_goblin(&mut world, &goblin, name, 5.0 + 6.0 * i as f64)?;
        }
        let events = Arc::new(ctx.event_bus());
        events.on("died", |args: &Args| {
            if let Some(name) = args.get(0) {
                info!("{} died", name);
            }
        });
        let mut senses = Senses {
            health: 10,
            ..Senses::default()
        };
        let mut brain = build_brain(ctx);
        brain.set_state("patrol", &mut senses);
        Ok(Self {
            world,
            movement: movement_system(),
            combat: combat_system(events.clone()),
            events,
            brain,
            tactics: build_tactics(),
            senses,
            hero,
            ticks: 0,
            max_ticks: ctx.config().max_ticks,
            should_quit,
        })
    }

    /// Position of the hero and the key of the nearest living goblin
    fn sense(&mut self) -> Option<EntityKey> {
        let hero_position = self
            .world
            .entity(self.hero)
            .and_then(|hero| hero.get_component::<f64>("position").copied())
            .unwrap_or(0.0);
        let nearest = self
            .world
            .keys_with("creature")
            .into_iter()
            .filter_map(|key| {
                let goblin = self.world.entity(key)?;
                if goblin.has_component("dead") {
                    return None;
                }
                let position = goblin.get_component::<f64>("position")?;
                Some((key, (position - hero_position).abs()))
            })
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        self.senses.health = self
            .world
            .entity(self.hero)
            .and_then(|hero| hero.get_component::<i64>("health").copied())
            .unwrap_or(0);
        self.senses.enemy_distance = nearest.map(|(_, distance)| distance);
        nearest.map(|(key, _)| key)
    }

    /// Runs a single iteration of the loop, returns if to keep going
    fn step(&mut self, dt: f64) -> bool {
        let target = self.sense();
        self.brain
            .update(&mut self.senses)
            .or_log_error("updating hero brain");
        let mut hero_hit = false;
        if self.brain.current_state() == Some("chase") {
            let strikes = self.senses.strikes;
            self.tactics.tick(&mut self.senses);
            if let (Some(target), true) = (target, self.senses.strikes > strikes) {
                if let Some(goblin) = self.world.entity_mut(target) {
                    goblin.add_component("damage", 2i64);
                }
                // Goblins hit back
                hero_hit = true;
            }
        }
        if let Some(hero) = self.world.entity_mut(self.hero) {
            hero.add_component("velocity", self.senses.heading);
            let health = self.senses.health.min(10) - if hero_hit { 1 } else { 0 };
            hero.add_component("health", health);
        }
        let everyone = self.world.keys();
        self.world.run_system(&mut self.movement, dt, &everyone);
        let fighters = self.world.keys_with("damage");
        self.world.run_system(&mut self.combat, dt, &fighters);

        self.ticks += 1;
        let out_of_ticks = self.max_ticks.map_or(false, |max| self.ticks >= max);
        let goblins_left = self
            .world
            .keys_with("creature")
            .into_iter()
            .filter(|key| {
                self.world
                    .entity(*key)
                    .map_or(false, |goblin| !goblin.has_component("dead"))
            })
            .count();
        !out_of_ticks && goblins_left > 0 && !self.should_quit.load(Ordering::Relaxed)
    }
}

fn main() {
    let config = match build_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    env_logger::Builder::new()
        .parse_filters(&config.log_filter)
        .parse_env("RUST_LOG")
        .init();
    trace!("{:?}", config);

    let should_quit = Arc::new(AtomicBool::new(false));
    let quit = should_quit.clone();
    ctrlc::set_handler(move || {
        info!("interrupted, stopping");
        quit.store(true, Ordering::Relaxed);
    })
    .or_log_warn("installing Ctrl+C handler");

    let ctx = Context::new(config);
    let mut demo = match Demo::new(&ctx, should_quit) {
        Ok(demo) => demo,
        Err(e) => {
            error!("failed to set up demo: {}", e);
            std::process::exit(1);
        }
    };
    info!("running");
    let mut metronome = Metronome::new(ctx.config().tick_seconds);
    let mut dt = metronome.target_tick();
    while demo.step(dt) {
        dt = metronome.wait_for_next_tick();
    }
    info!(
        "done after {} ticks, {} strikes, {} channels in use",
        demo.ticks,
        demo.senses.strikes,
        demo.events.channel_names().len()
    );
}
