use glam::Vec2;
use marquee_engine::systems::effects::offscreen_offset;
use marquee_engine::*;

const WINDOW: Vec2 = Vec2::new(800.0, 600.0);
const DT: f32 = 1.0 / 60.0;

fn factory() -> EffectFactory {
    EffectFactory::new(WINDOW)
}

/// A 100×40 box centred at (300, 200).
fn entity(effects: Vec<Box<dyn Effect>>) -> Entity {
    let mut e = Entity::new(EntityId(1))
        .with_name("box")
        .with_content(Content::rect(Vec2::new(100.0, 40.0)))
        .with_pivot(Pivot::Center)
        .with_position(Vec2::new(300.0, 200.0))
        .with_window(WINDOW);
    e.set_effect_sequence(effects);
    e
}

fn steps_for(seconds: f32) -> usize {
    (seconds / DT).ceil() as usize + 2
}

fn tick(e: &mut Entity, steps: usize) {
    for _ in 0..steps {
        e.update(DT, Color::WHITE);
    }
}

fn outside_window(b: Bounds) -> bool {
    b.max.x <= 0.0 || b.min.x >= WINDOW.x || b.max.y <= 0.0 || b.min.y >= WINDOW.y
}

#[test]
fn same_updates_give_bit_identical_results() {
    for kind in EffectType::ALL {
        let mut a = entity(vec![factory().create(kind, 0.1, 0.7)]);
        let mut b = entity(vec![factory().create(kind, 0.1, 0.7)]);
        a.run();
        b.run();
        for _ in 0..50 {
            a.update(DT, Color::WHITE);
            b.update(DT, Color::WHITE);
        }
        assert_eq!(a.live(), b.live(), "{}", kind);
    }
}

#[test]
fn finite_effects_land_exactly_on_target() {
    for kind in EffectType::ALL.into_iter().filter(|k| !k.is_cyclic()) {
        let (delay, duration) = (0.25, 0.8);
        let mut e = entity(vec![factory().create(kind, delay, duration)]);
        let home = *e.home();
        e.run();
        tick(&mut e, steps_for(delay + duration));
        assert!(e.effects()[0].is_finished(), "{}", kind);

        let live = *e.live();
        let name = kind.name();
        if name.starts_with("move_in") {
            assert_eq!(live.position, home.position, "{}", kind);
        } else if name.starts_with("move_out") {
            assert!(outside_window(e.bounds()), "{} ends at {:?}", kind, live.position);
        } else if kind == EffectType::FadeIn {
            assert_eq!(live.color.a, 255);
        } else if kind == EffectType::FadeOut {
            assert_eq!(live.color.a, 0);
        } else {
            assert_eq!(live.scale, home.scale, "{}", kind);
            assert_eq!(live.rotation, home.rotation, "{}", kind);
        }
    }
}

#[test]
fn cyclic_effects_never_finish() {
    for kind in EffectType::ALL.into_iter().filter(|k| k.is_cyclic()) {
        let mut e = entity(vec![factory().create(kind, 0.0, 0.5)]);
        e.run();
        tick(&mut e, 600);
        assert!(!e.effects()[0].is_finished(), "{}", kind);
        assert_eq!(e.active_effect(), Some(0));
    }
}

#[test]
fn stop_restores_baseline_at_any_time() {
    for kind in EffectType::ALL {
        for steps in [0, 1, 7, 20, 45, 200] {
            let mut e = entity(vec![factory().create(kind, 0.1, 0.5)]);
            let before = *e.live();
            e.run();
            tick(&mut e, steps);
            e.stop();
            assert_eq!(*e.live(), before, "{} after {} steps", kind, steps);
        }
    }
}

#[test]
fn sequence_hands_over_then_rests_on_last() {
    let f = factory();
    let mut e = entity(vec![
        f.create(EffectType::MoveInEaseLeft, 0.0, 0.5),
        f.create(EffectType::FadeOut, 0.0, 0.5),
    ]);
    e.run();

    // 0.5s at 1/60 lands on the last tick of the first effect.
    tick(&mut e, 30);
    assert!(e.effects()[0].is_finished());
    assert_eq!(e.active_effect(), Some(0));
    assert_eq!(e.live().position, Vec2::new(300.0, 200.0));

    tick(&mut e, 1);
    assert_eq!(e.active_effect(), Some(1));
    assert!(e.opacity() < 255);

    tick(&mut e, 40);
    assert_eq!(e.opacity(), 0);
    let rested = *e.live();
    tick(&mut e, 120);
    assert_eq!(e.active_effect(), Some(1));
    assert_eq!(*e.live(), rested);
}

#[test]
fn cyclic_sequence_restarts_first_effect_from_offscreen() {
    let f = factory();
    let mut e = entity(vec![
        f.create(EffectType::MoveInEaseLeft, 0.0, 0.5),
        f.create(EffectType::MoveOutBackRight, 0.0, 0.5),
    ])
    .with_cyclic_effects(true);
    e.run();

    for _ in 0..3 {
        tick(&mut e, 30);
        assert_eq!(e.live().position, Vec2::new(300.0, 200.0));
        tick(&mut e, 1);
        assert_eq!(e.active_effect(), Some(1));
        tick(&mut e, 29);
        assert!(e.effects()[1].is_finished());
        // Just outside the right edge: 300 + (800 - 300 + 50).
        assert_eq!(e.live().position.x, 850.0);

        tick(&mut e, 1);
        assert_eq!(e.active_effect(), Some(0));
        e.update(0.0, Color::WHITE);
        // Just outside the left edge: 300 - (50 + 300).
        assert_eq!(e.live().position.x, -50.0);
    }
}

#[test]
fn flip_twice_equals_flip_once() {
    let mut once = entity(Vec::new()).with_scale(Vec2::new(2.0, 3.0));
    once.set_flip(true, false);
    let mut twice = entity(Vec::new()).with_scale(Vec2::new(2.0, 3.0));
    twice.set_flip(true, false);
    twice.set_flip(true, false);
    assert_eq!(once.home().scale, Vec2::new(-2.0, 3.0));
    assert_eq!(twice.home().scale, once.home().scale);
    assert_eq!(twice.live().scale, once.live().scale);
}

#[test]
fn offscreen_offsets_match_edge_formulas() {
    let half = Vec2::new(35.0, 10.0);
    let x0 = 120.0;
    let resting = Vec2::new(x0, 90.0);
    assert_eq!(offscreen_offset(Edge::Left, half, resting, WINDOW).x, -(half.x + x0));
    assert_eq!(offscreen_offset(Edge::Right, half, resting, WINDOW).x, WINDOW.x - x0 + half.x);
}

#[test]
fn pop_in_consumes_whole_tween_in_one_update() {
    let mut e = entity(vec![factory().create(EffectType::PopIn, 0.0, 1.0)]);
    assert_eq!(e.home().scale, Vec2::ONE);
    e.run();
    e.update(1.0, Color::WHITE);
    assert_eq!(e.live().scale, Vec2::ONE);
    assert!(e.effects()[0].is_finished());
}

#[test]
fn fade_out_waits_out_its_delay() {
    let mut e = entity(vec![factory().create(EffectType::FadeOut, 0.1, 0.5)]);
    assert_eq!(e.opacity(), 255);
    e.run();
    e.update(0.05, Color::WHITE);
    assert_eq!(e.opacity(), 255);
    e.update(0.55, Color::WHITE);
    assert_eq!(e.opacity(), 0);
}

#[test]
fn parent_effects_carry_children() {
    let f = factory();
    let child = Entity::new(EntityId(2))
        .with_name("label")
        .with_content(Content::rect(Vec2::new(10.0, 10.0)))
        .with_pivot(Pivot::TopLeft)
        .with_position(Vec2::new(5.0, 5.0));
    let mut parent = entity(vec![f.create(EffectType::FadeIn, 0.0, 0.5)]).with_child(child);
    parent.run_all();
    tick(&mut parent, 15);

    let half_alpha = parent.opacity();
    assert!(half_alpha > 0 && half_alpha < 255);
    assert_eq!(parent.find("label").unwrap().tint().a, half_alpha);

    let mut buffer = RenderBuffer::new();
    parent.draw(&mut buffer, &RenderStates::default());
    assert_eq!(buffer.instance_count(), 2);
    // Child origin = parent top-left (250, 180) + child position.
    let child = buffer.instances[1];
    assert_eq!(child.transform_point(Vec2::ZERO), Vec2::new(255.0, 185.0));
}

const MANIFEST: &str = r#"{
    "textures": [ { "name": "cover", "path": "cover.png", "width": 200, "height": 280 } ],
    "fonts": [ { "name": "ui", "path": "ui.png" } ],
    "sounds": { "launch": { "path": "launch.ogg", "event_id": 4 } }
}"#;

const LAYOUT: &str = r#"{
    "name": "shelf",
    "root": {
        "name": "root",
        "children": [
            { "name": "cover", "kind": { "image": { "texture": "cover" } },
              "position": [400, 300], "pivot": "center",
              "effects": [ { "type": "move_in_bounce_bottom", "duration": 0.5 },
                           { "type": "fade", "duration": 1.0 } ] },
            { "name": "title", "kind": { "text": { "font": "ui", "text": "Galaga" } },
              "position": [400, 80], "pivot": "center" }
        ]
    },
    "triggers": { "select": ["cover"] },
    "sounds": { "select": "launch" }
}"#;

#[test]
fn layout_theme_runs_end_to_end() {
    let config = StageConfig {
        window_width: WINDOW.x,
        window_height: WINDOW.y,
        ..StageConfig::default()
    };
    let mut theme = LayoutTheme::from_json(LAYOUT, config.clone())
        .unwrap()
        .with_manifest(AssetManifest::from_json(MANIFEST).unwrap());
    let mut ctx = StageContext::new(&config);
    theme.init(&mut ctx);
    assert_eq!(ctx.scene.len(), 3);

    // The cover starts below the window and bounces up into place.
    ctx.scene.update(0.0);
    assert!(ctx.scene.find("cover").unwrap().live().position.y > WINDOW.y);
    for _ in 0..31 {
        ctx.scene.update(DT);
    }
    let cover = ctx.scene.find("cover").unwrap();
    assert_eq!(cover.live().position, Vec2::new(400.0, 300.0));
    assert_eq!(cover.active_effect(), Some(1));

    let mut buffer = RenderBuffer::with_capacity(config.max_instances);
    ctx.scene.draw(&mut buffer);
    assert_eq!(buffer.instance_count(), 2);
    assert_eq!(buffer.instances[0].kind, InstanceKind::Image as u8 as f32);
    assert_eq!(buffer.instances[1].kind, InstanceKind::Text as u8 as f32);
    assert_eq!(buffer.texts[buffer.instances[1].resource as usize].text, "Galaga");

    let mut input = InputQueue::new();
    input.push(InputEvent::ButtonDown { button: 0 });
    theme.update(&mut ctx, &input);
    assert_eq!(ctx.sounds, vec![SoundEvent(4)]);
    assert_eq!(ctx.events[0].kind, EVENT_ACTION);
    assert_eq!(ctx.scene.find("cover").unwrap().active_effect(), Some(0));
}
