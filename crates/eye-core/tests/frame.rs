use blink_eyes::{
    BlinkPhase, Canvas, Color, EyeConfig, EyeEngine, EyeError, Point, Rect, RenderSurface,
    SurfaceError,
};

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Clear,
    Color(Color),
    Rect(Rect),
    Polygon(usize),
    Circle(Point, f32),
    Clip(Rect),
    Present,
    EndFrame,
}

/// Records every call; optionally fails the next `fail_presents` presents.
#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
    fail_presents: u32,
}

impl RenderSurface for Recorder {
    fn size(&self) -> (u32, u32) {
        (320, 240)
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.calls.push(Call::Clear);
        Ok(())
    }

    fn set_color(&mut self, color: Color) {
        self.calls.push(Call::Color(color));
    }

    fn fill_rectangle(&mut self, rect: Rect) -> Result<(), SurfaceError> {
        self.calls.push(Call::Rect(rect));
        Ok(())
    }

    fn fill_polygon(&mut self, points: &[Point]) -> Result<(), SurfaceError> {
        self.calls.push(Call::Polygon(points.len()));
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f32) -> Result<(), SurfaceError> {
        self.calls.push(Call::Circle(center, radius));
        Ok(())
    }

    fn set_clip(&mut self, rect: Rect) -> Result<(), SurfaceError> {
        self.calls.push(Call::Clip(rect));
        Ok(())
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        if self.fail_presents > 0 {
            self.fail_presents -= 1;
            return Err(SurfaceError::Present("display busy".into()));
        }
        self.calls.push(Call::Present);
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), SurfaceError> {
        self.calls.push(Call::EndFrame);
        Ok(())
    }
}

fn engine() -> EyeEngine {
    EyeEngine::from_config(&EyeConfig::default()).unwrap()
}

#[test]
fn draw_calls_follow_layer_order() {
    let mut engine = engine();
    let mut surface = Recorder::default();
    engine.tick(&mut surface).unwrap();

    let pair = engine.renderer().eyes();
    let (left, right) = (pair.left.socket(), pair.right.socket());
    // wander step 0: left iris offset (0, 16), right iris offset (16, 0)
    let left_iris = Point::new(256.0, 136.0);
    let right_iris = Point::new(80.0, 120.0);
    // sin(1) / 2 + 0.5 of the 12..22 range, rounded
    let pupil = 21.0;

    let expected = vec![
        Call::Color(Color::WHITE),
        Call::Clip(left),
        Call::Rect(left),
        Call::Clip(right),
        Call::Rect(right),
        Call::Clip(left),
        Call::Color(Color::RED),
        Call::Circle(left_iris, 28.0),
        Call::Color(Color::BLACK),
        Call::Circle(left_iris, pupil),
        Call::Clip(right),
        Call::Color(Color::RED),
        Call::Circle(right_iris, 28.0),
        Call::Color(Color::BLACK),
        Call::Circle(right_iris, pupil),
        Call::Color(Color::BLACK),
        Call::Clip(left),
        Call::Polygon(34),
        Call::Polygon(34),
        Call::Clip(right),
        Call::Polygon(34),
        Call::Polygon(34),
        Call::Present,
        Call::EndFrame,
    ];
    assert_eq!(surface.calls, expected);
}

#[test]
fn prepare_blanks_the_screen() {
    let engine = engine();
    let mut surface = Recorder::default();
    engine.prepare(&mut surface).unwrap();
    let screen = Rect::new(0.0, 0.0, 320.0, 240.0);
    assert_eq!(
        surface.calls,
        vec![
            Call::Clear,
            Call::Clip(screen),
            Call::Color(Color::BLACK),
            Call::Rect(screen),
            Call::Present,
            Call::EndFrame,
        ]
    );
}

#[test]
fn failed_present_does_not_advance_the_animation() {
    let mut engine = engine();
    let mut surface = Recorder {
        fail_presents: 1,
        ..Recorder::default()
    };

    let err = engine.tick(&mut surface).unwrap_err();
    assert!(matches!(err, EyeError::Surface(SurfaceError::Present(_))));
    assert_eq!(engine.sequencer().wander().step(), 0);

    let frame = engine.tick(&mut surface).unwrap();
    assert_eq!(frame.index, 0);
    assert_eq!(frame.wander.step(), 0);
    assert_eq!(engine.sequencer().wander().step(), 1);
}

#[test]
fn engine_runs_through_a_whole_blink() {
    let mut engine = engine();
    let mut surface = Recorder::default();
    let frames: Vec<_> = (0..33).map(|_| engine.tick(&mut surface).unwrap()).collect();

    assert_eq!(frames[0].phase, BlinkPhase::Closing);
    assert_eq!(frames[16].blink, 1.0);
    assert_eq!(frames[32].blink, 0.0);
    assert_eq!(frames[32].phase, BlinkPhase::Wandering);
    let presents = surface.calls.iter().filter(|c| **c == Call::Present).count();
    assert_eq!(presents, 33);
}

#[test]
fn canvas_shows_open_then_closed_eyes() {
    let mut engine = engine();
    let mut canvas = Canvas::new(320, 240).unwrap();
    engine.prepare(&mut canvas).unwrap();

    let open = engine.tick(&mut canvas).unwrap();
    assert_eq!(open.blink, 0.0);
    // above the left iris, inside the open lids
    assert_eq!(canvas.pixel(256, 100), Some(Color::WHITE));
    assert_eq!(canvas.pixel(256, 136), Some(Color::BLACK));
    assert_eq!(canvas.pixel(256, 112), Some(Color::RED));
    // between the eyes
    assert_eq!(canvas.pixel(160, 120), Some(Color::BLACK));

    loop {
        let frame = engine.tick(&mut canvas).unwrap();
        if frame.blink == 1.0 {
            break;
        }
    }
    assert_eq!(canvas.pixel(256, 100), Some(Color::BLACK));
    assert_eq!(canvas.pixel(64, 100), Some(Color::BLACK));
    assert_eq!(canvas.frames_presented(), 18);
}

#[test]
fn bad_config_fails_before_rendering() {
    let mut config = EyeConfig::default();
    config.blink.steps = 0;
    let err = EyeEngine::from_config(&config).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn eyes_off_screen_are_rejected() {
    let mut config = EyeConfig::default();
    config.eye.separation = 10.0;
    let err = EyeEngine::from_config(&config).unwrap_err();
    assert!(matches!(err, EyeError::InvalidConfig(_)), "{err}");
}
