/// Terminal front-end for the meshview core
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::{debug, info, warn};
use meshview_core::Viewer;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod args;
pub mod keys;
pub mod renderer;

pub use args::Args;
pub use keys::KeyTracker;
pub use renderer::AsciiRenderer;

/// Main application struct for terminal 3D viewing
pub struct TerminalApp {
    viewer: Viewer,
    renderer: AsciiRenderer,
    keys: KeyTracker,
    enhanced_keyboard: bool,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    triangles_drawn: usize,
}

impl TerminalApp {
    pub fn new(viewer: Viewer) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let enhanced_keyboard = terminal::supports_keyboard_enhancement().unwrap_or(false);
        let renderer = AsciiRenderer::new(width as usize, height as usize, &viewer.config().camera);

        Ok(Self {
            viewer,
            renderer,
            keys: KeyTracker::new(enhanced_keyboard),
            enhanced_keyboard,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            triangles_drawn: 0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        if self.enhanced_keyboard {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        } else {
            warn!("terminal does not report key releases, holding keys by timeout");
        }

        let result = self.main_loop();

        // Cleanup
        if self.enhanced_keyboard {
            execute!(stdout(), PopKeyboardEnhancementFlags)?;
        }
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        info!("viewer closed after {} frames", self.viewer.frames());
        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 60); // 60 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Render, then apply held keys
            self.renderer.clear();
            self.keys.expire(frame_start);
            let stats = self.viewer.frame(&mut self.renderer, &self.keys);
            self.triangles_drawn = stats.triangles_drawn;

            self.present()?;
            self.drain_events()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Handle everything the terminal queued since the last frame
    fn drain_events(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            let now = Instant::now();
            match event::read()? {
                Event::Key(key) if keys::is_quit(&key) => {
                    debug!("close requested");
                    self.running = false;
                }
                Event::Key(key) => self.keys.handle(&key, now),
                Event::Resize(width, height) => {
                    self.renderer.resize(width as usize, height as usize)
                }
                Event::FocusLost => self.keys.clear(),
                _ => {}
            }
        }
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "{} | {}/{} faces | FPS: {:.1} | Arrows=Pitch/Yaw PgUp/PgDn=Roll WASD/QE=Move Esc=Quit",
                self.viewer.title().unwrap_or("meshview"),
                self.triangles_drawn,
                self.viewer.mesh().len(),
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
