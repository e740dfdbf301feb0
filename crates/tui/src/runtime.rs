//! Terminal session: raw mode, the input thread and the frame loop.

use std::io::stdout;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Result, anyhow};
use ayat_core::AnnotationService;
use log::{info, warn};
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{
	self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use ratatui::crossterm::execute;

use crate::{App, SessionOptions, SessionOutcome};

const INPUT_POLL: Duration = Duration::from_millis(50);
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Construct an [`App`] around `service` and run it to completion.
pub fn run<S>(service: S, options: SessionOptions) -> Result<SessionOutcome>
where
	S: AnnotationService + 'static,
{
	let mut app = App::new(service, options);
	app.run()
}

/// Owns the terminal for the length of a session and gives it back on drop,
/// including when the frame loop bails out with an error.
struct Screen {
	terminal: DefaultTerminal,
}

impl Screen {
	fn enter() -> Result<Self> {
		let mut terminal = ratatui::init();
		terminal.clear()?;
		execute!(stdout(), EnableMouseCapture)?;
		Ok(Self { terminal })
	}
}

impl Drop for Screen {
	fn drop(&mut self) {
		if let Err(err) = execute!(stdout(), DisableMouseCapture) {
			warn!("could not release mouse capture: {err}");
		}
		ratatui::restore();
	}
}

/// Reads terminal events on a background thread so the frame loop never
/// blocks on input.
struct InputPump {
	events: Receiver<Event>,
	running: Arc<AtomicBool>,
	handle: Option<JoinHandle<Result<()>>>,
}

impl InputPump {
	fn start() -> Self {
		let (tx, events) = mpsc::channel();
		let running = Arc::new(AtomicBool::new(true));
		let flag = Arc::clone(&running);
		let handle = thread::spawn(move || -> Result<()> {
			while flag.load(Ordering::Relaxed) {
				if event::poll(INPUT_POLL)? && tx.send(event::read()?).is_err() {
					break;
				}
			}
			Ok(())
		});
		Self {
			events,
			running,
			handle: Some(handle),
		}
	}

	/// Everything read since the last frame, oldest first.
	fn drain(&self) -> Result<Vec<Event>> {
		let mut batch = Vec::new();
		loop {
			match self.events.try_recv() {
				Ok(event) => batch.push(event),
				Err(TryRecvError::Empty) => return Ok(batch),
				Err(TryRecvError::Disconnected) => {
					return Err(anyhow!("input event channel disconnected"));
				}
			}
		}
	}

	fn stop(mut self) -> Result<()> {
		self.running.store(false, Ordering::Relaxed);
		match self.handle.take().map(JoinHandle::join) {
			Some(Ok(result)) => result,
			Some(Err(panic)) => std::panic::resume_unwind(panic),
			None => Ok(()),
		}
	}
}

impl<'a> App<'a> {
	/// Pump the terminal event loop until the user quits.
	pub fn run(&mut self) -> Result<SessionOutcome> {
		let mut screen = Screen::enter()?;
		let input = InputPump::start();

		let result = self.frame_loop(&mut screen, &input);
		let stopped = input.stop();
		drop(screen);
		result?;
		stopped?;

		info!("session finished: {:?}", self.outcome);
		Ok(self.outcome.clone())
	}

	fn frame_loop(&mut self, screen: &mut Screen, input: &InputPump) -> Result<()> {
		loop {
			if self.dispatch(input.drain()?) {
				return Ok(());
			}

			self.pump_service_replies();
			self.throbber_state.calc_next();
			screen.terminal.draw(|frame| self.draw(frame))?;

			thread::sleep(FRAME_INTERVAL);
		}
	}

	/// Feed a batch of terminal events to the handlers. Returns `true` once
	/// one of them asks to quit; the rest of the batch is dropped.
	fn dispatch(&mut self, events: Vec<Event>) -> bool {
		for event in events {
			match event {
				Event::Key(key) if key.kind == KeyEventKind::Press => {
					if self.handle_key(key) {
						return true;
					}
				}
				Event::Mouse(mouse) => self.handle_mouse(mouse),
				_ => {}
			}
		}
		false
	}
}
