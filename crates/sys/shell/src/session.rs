//! The interactive session: one console, one line of input, and the
//! state behind the stateful built-ins.
//!
//! All process-wide mutable state lives here and is passed in explicitly,
//! so tests can run any number of sessions against fake devices.

use alloc::format;
use alloc::string::String;

use textos_console::{Color, Console};
use textos_driver_keyboard::{decode, Key};
use textos_driver_traits::{KeyboardPort, TextSurface};

use crate::calc::{self, CalcError};
use crate::command::{parse, Command, ParseError};
use crate::game::{Game, MoveOutcome};
use crate::input::{InputLine, ERASE_BG, ERASE_FG};
use crate::vars::{VarError, VarStore};

/// One-shot hardware facts read at boot for `sysinfo`.
pub struct SystemFacts {
    /// CPUID leaf 0 vendor string (EBX:EDX:ECX)
    pub cpu_vendor: [u8; 12],
    /// Conventional memory size from the BIOS data area
    pub memory_kb: u16,
}

impl SystemFacts {
    pub fn vendor_str(&self) -> &str {
        core::str::from_utf8(&self.cpu_vendor).unwrap_or("unknown")
    }
}

/// What the kernel loop should do after a poll or dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exec {
    Continue,
    /// Spin until a key is pending, then continue
    Pause,
    /// Halt the machine; never resumes
    Shutdown,
}

pub struct Session<S: TextSurface> {
    console: Console<S>,
    line: InputLine,
    game: Game,
    vars: VarStore,
    facts: SystemFacts,
}

impl<S: TextSurface> Session<S> {
    pub fn new(surface: S, facts: SystemFacts) -> Self {
        let mut console = Console::new(surface);
        console.clear();
        Session {
            console,
            line: InputLine::new(),
            game: Game::new(),
            vars: VarStore::new(),
            facts,
        }
    }

    pub fn console(&self) -> &Console<S> {
        &self.console
    }

    /// The line currently being edited.
    pub fn pending_input(&self) -> &str {
        self.line.as_str()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn vars(&self) -> &VarStore {
        &self.vars
    }

    /// Redraw the splash banner; called every iteration of the idle loop.
    pub fn draw_banner(&mut self) {
        self.console.draw_banner();
    }

    /// One step of the input pipeline: poll the keyboard, apply at most
    /// one key to the line buffer and console, dispatch on enter.
    pub fn poll<K: KeyboardPort>(&mut self, keyboard: &mut K) -> Exec {
        if !keyboard.has_byte() {
            return Exec::Continue;
        }
        let scancode = keyboard.read_byte();
        let key = match decode(scancode) {
            Some(key) => key,
            None => return Exec::Continue,
        };

        match key {
            Key::Char(ch) => {
                // a full buffer drops the character without echo
                if self.line.push(ch) {
                    self.console.put_char(ch);
                }
                Exec::Continue
            }
            Key::Backspace => {
                if self.line.pop() {
                    self.console.erase_back(ERASE_FG, ERASE_BG);
                }
                Exec::Continue
            }
            Key::Delete => {
                self.console.erase_at(ERASE_FG, ERASE_BG);
                Exec::Continue
            }
            Key::Enter => match self.submit() {
                Exec::Pause => {
                    while !keyboard.has_byte() {
                        core::hint::spin_loop();
                    }
                    let _ = keyboard.read_byte();
                    Exec::Continue
                }
                other => other,
            },
        }
    }

    /// Dispatch the current line, then clear the buffer and drop the
    /// cursor to the next row regardless of the outcome.
    fn submit(&mut self) -> Exec {
        let line = String::from(self.line.as_str());
        let exec = self.execute(&line);
        self.line.clear();
        let row = self.console.cursor_row();
        self.console.set_cursor_row(row + 1);
        exec
    }

    /// Parse and run one command line. Never fails; errors become
    /// feedback on the console.
    pub fn execute(&mut self, line: &str) -> Exec {
        match parse(line) {
            Ok(command) => self.dispatch(command),
            Err(ParseError::UnknownCommand) => {
                self.report("Unknown command!");
                Exec::Continue
            }
            Err(ParseError::Usage(usage)) => {
                self.report(usage);
                Exec::Continue
            }
        }
    }

    fn dispatch(&mut self, command: Command<'_>) -> Exec {
        match command {
            Command::Cls => self.console.clear(),
            Command::Help => self.cmd_help(),
            Command::Shutdown => {
                self.report("System shutting down...");
                return Exec::Shutdown;
            }
            Command::Pause => {
                self.report("Press any key to continue...");
                return Exec::Pause;
            }
            Command::SysInfo => self.cmd_sysinfo(),
            Command::SetColor { fg, bg } => self.cmd_setcolor(fg, bg),
            Command::TicTacToe => self.cmd_tictactoe(),
            Command::Move { row, col } => self.cmd_move(row, col),
            Command::Calc { a, op, b } => self.cmd_calc(a, op, b),
            Command::SetSplash { text } => self.cmd_setsplash(text),
            Command::SetColorSplash { color } => self.cmd_setcolorsplash(color),
            Command::PrintColorText { color, text } => self.cmd_printcolortext(color, text),
            Command::CreateVar { name, value } => self.cmd_createvar(name, value),
            Command::ShowVars => self.cmd_showvars(),
            Command::Fill { glyph, fg, bg, height, width } => {
                self.cmd_fill(glyph, fg, bg, height, width)
            }
        }
        Exec::Continue
    }

    /// Feedback goes to column 0 of the row the cursor is on.
    fn report(&mut self, message: &str) {
        let row = self.console.cursor_row();
        self.console.print_at(message, row, 0);
    }

    fn cmd_help(&mut self) {
        const LINES: [&str; 16] = [
            "Available commands:",
            "  cls - clear screen",
            "  help - show this summary",
            "  shutdown - shut down the system",
            "  sysinfo - display system information",
            "  setcolor <fg> <bg> - change text and background colors",
            "  tictactoe - play Tic-Tac-Toe",
            "  move <row> <col> - make a move in Tic-Tac-Toe",
            "  calc <a> <op> <b> - evaluate an expression",
            "  setsplash <text> - change the banner text",
            "  setcolorsplash <color> - change the banner color",
            "  printcolortext <color> <text> - print text in a color",
            "  createvar <name> <value> - store a variable (alias: var)",
            "  showvars - list stored variables",
            "  fill <char> <fg> <bg> <h> <w> - paint a rectangle",
            "  pause - wait for a keypress",
        ];
        let row = self.console.cursor_row();
        for (i, line) in LINES.iter().enumerate() {
            self.console.print_at(line, row + i, 0);
        }
        self.console.set_cursor_row(row + LINES.len());
    }

    fn cmd_sysinfo(&mut self) {
        let row = self.console.cursor_row();
        let vendor = String::from(self.facts.vendor_str());
        let memory = format!("Memory: {} KB", self.facts.memory_kb);
        self.console.print_at("System Information:", row, 0);
        self.console.print_at("CPU Vendor: ", row + 1, 0);
        self.console.print_at(&vendor, row + 1, 12);
        self.console.print_at(&memory, row + 2, 0);
        self.console.set_cursor_row(row + 4);
    }

    fn cmd_setcolor(&mut self, fg: &str, bg: &str) {
        match (Color::from_name(fg), Color::from_name(bg)) {
            (Some(fg), Some(bg)) => {
                self.console.set_colors(fg, bg);
                self.console.clear();
                self.report("Color updated!");
            }
            _ => self.report("Invalid color names! Use valid names (e.g., red white)."),
        }
    }

    fn cmd_tictactoe(&mut self) {
        self.game.reset();
        self.report("Tic-Tac-Toe started! Use move <row> <col>.");
        let row = self.console.cursor_row();
        self.console.set_cursor_row(row + 1);
        self.render_board();
    }

    fn cmd_move(&mut self, row: i32, col: i32) {
        match self.game.move_at(row, col) {
            MoveOutcome::OutOfRange => self.report("Invalid position! Use row and col (1-3)."),
            MoveOutcome::Taken => self.report("Position already taken!"),
            MoveOutcome::NextTurn => self.render_board(),
            MoveOutcome::Won(player) => {
                self.render_board();
                let message = format!("Player {} wins!", player.glyph() as char);
                self.report(&message);
                self.game.reset();
            }
            MoveOutcome::Draw => {
                self.render_board();
                self.report("It's a draw!");
                self.game.reset();
            }
        }
    }

    fn mark(&self, row: usize, col: usize) -> char {
        match self.game.cell(row, col) {
            Some(player) => player.glyph() as char,
            None => ' ',
        }
    }

    /// Draw the board from the current row and park the cursor below it.
    fn render_board(&mut self) {
        let row = self.console.cursor_row();
        for i in 0..3 {
            let line = format!(" {} | {} | {}", self.mark(i, 0), self.mark(i, 1), self.mark(i, 2));
            self.console.print_at(&line, row + i * 2, 0);
            if i < 2 {
                self.console.print_at("---|---|---", row + i * 2 + 1, 0);
            }
        }
        self.console.set_cursor_row(row + 6);
    }

    fn cmd_calc(&mut self, a: i32, op: &str, b: i32) {
        match calc::eval(a, op, b) {
            Ok(result) => {
                let message = format!("Result: {}", result);
                self.report(&message);
            }
            Err(CalcError::DivideByZero) => self.report("Error: Division by zero!"),
            Err(CalcError::UnknownOperator) => self.report("Error: Unknown operator!"),
        }
    }

    fn cmd_setsplash(&mut self, text: &str) {
        self.console.set_banner(text);
        self.console.clear();
        self.report("Splash text updated!");
    }

    fn cmd_setcolorsplash(&mut self, color: &str) {
        match Color::from_name(color) {
            Some(color) => {
                self.console.set_splash_fg(color);
                self.report("Splash color updated!");
            }
            None => self.report("Invalid color name! Use valid names (e.g., yellow)."),
        }
    }

    fn cmd_printcolortext(&mut self, color: &str, text: &str) {
        match Color::from_name(color) {
            Some(color) => self.console.print_colored(text, color),
            None => self.report("Invalid color name! Use valid names (e.g., green)."),
        }
    }

    fn cmd_createvar(&mut self, name: &str, value: &str) {
        match self.vars.create(name, value) {
            Ok(()) => self.report("Variable stored."),
            Err(VarError::LimitReached) => self.report("Variable limit reached!"),
        }
    }

    fn cmd_showvars(&mut self) {
        if self.vars.is_empty() {
            self.report("No variables defined.");
            return;
        }
        let row = self.console.cursor_row();
        let count = self.vars.len();
        for (i, entry) in self.vars.entries().iter().enumerate() {
            let line = format!("{} = {}", entry.name, entry.value);
            self.console.print_at(&line, row + i, 0);
        }
        self.console.set_cursor_row(row + count);
    }

    fn cmd_fill(&mut self, glyph: u8, fg: &str, bg: &str, height: i32, width: i32) {
        match (Color::from_name(fg), Color::from_name(bg)) {
            (Some(fg), Some(bg)) => {
                self.console.clear();
                let height = height.max(0) as usize;
                let width = width.max(0) as usize;
                self.console.fill_rect(glyph, fg, bg, height, width);
            }
            _ => self.report("Invalid color names! Use valid names (e.g., red white)."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;
    use alloc::vec::Vec;
    use textos_console::{COLS, GRID_SIZE, INPUT_START_ROW, ROWS};
    use textos_driver_traits::Scancode;

    struct FakeSurface {
        glyphs: [u8; GRID_SIZE],
        attrs: [u8; GRID_SIZE],
        cursor: usize,
    }

    impl FakeSurface {
        fn new() -> Self {
            FakeSurface {
                glyphs: [0; GRID_SIZE],
                attrs: [0; GRID_SIZE],
                cursor: 0,
            }
        }

        fn row_text(&self, row: usize) -> String {
            let start = row * COLS;
            self.glyphs[start..start + COLS]
                .iter()
                .map(|&b| if b == 0 { ' ' } else { b as char })
                .collect()
        }
    }

    impl TextSurface for FakeSurface {
        fn write_cell(&mut self, offset: usize, glyph: u8, attr: u8) {
            if offset >= GRID_SIZE {
                return;
            }
            self.glyphs[offset] = glyph;
            self.attrs[offset] = attr;
        }

        fn set_cursor(&mut self, offset: usize) {
            self.cursor = offset;
        }
    }

    struct FakeKeyboard {
        codes: Vec<Scancode>,
        pos: usize,
    }

    impl FakeKeyboard {
        fn new(codes: &[Scancode]) -> Self {
            FakeKeyboard {
                codes: codes.to_vec(),
                pos: 0,
            }
        }
    }

    impl KeyboardPort for FakeKeyboard {
        fn has_byte(&mut self) -> bool {
            self.pos < self.codes.len()
        }

        fn read_byte(&mut self) -> Scancode {
            let code = self.codes[self.pos];
            self.pos += 1;
            code
        }
    }

    fn new_session() -> Session<FakeSurface> {
        Session::new(
            FakeSurface::new(),
            SystemFacts {
                cpu_vendor: *b"GenuineIntel",
                memory_kb: 640,
            },
        )
    }

    fn screen_contains(session: &Session<FakeSurface>, needle: &str) -> bool {
        (0..ROWS).any(|row| session.console().surface().row_text(row).contains(needle))
    }

    /// Drain a scancode script through the pipeline.
    fn run_keys(session: &mut Session<FakeSurface>, codes: &[Scancode]) -> Exec {
        let mut keyboard = FakeKeyboard::new(codes);
        let mut last = Exec::Continue;
        while keyboard.has_byte() {
            last = session.poll(&mut keyboard);
        }
        last
    }

    const WHITE_ON_BLUE: u8 = 0x1F;

    #[test]
    fn test_new_session_is_cleared_at_input_row() {
        let session = new_session();
        assert_eq!(session.console().cursor(), INPUT_START_ROW * COLS);
        let surface = session.console().surface();
        assert!(surface.glyphs.iter().all(|&g| g == b' '));
        assert!(surface.attrs.iter().all(|&a| a == WHITE_ON_BLUE));
    }

    #[test]
    fn test_typing_echoes_in_order() {
        let mut session = new_session();
        // 'a' 'b' 'c'
        run_keys(&mut session, &[0x1E, 0x30, 0x2E]);
        assert_eq!(session.pending_input(), "abc");
        assert!(session
            .console()
            .surface()
            .row_text(INPUT_START_ROW)
            .starts_with("abc"));
    }

    #[test]
    fn test_releases_and_unmapped_keys_are_ignored() {
        let mut session = new_session();
        let before = session.console().cursor();
        // release of 'a', escape, F1
        run_keys(&mut session, &[0x1E | 0x80, 0x01, 0x3B]);
        assert_eq!(session.pending_input(), "");
        assert_eq!(session.console().cursor(), before);
    }

    #[test]
    fn test_backspace_on_empty_line_is_noop() {
        let mut session = new_session();
        let before = session.console().cursor();
        run_keys(&mut session, &[0x0E]);
        assert_eq!(session.console().cursor(), before);
        assert_eq!(session.pending_input(), "");
    }

    #[test]
    fn test_backspace_erases_with_fixed_colors() {
        let mut session = new_session();
        session.execute("setcolor green black");
        // 'a' then backspace: the blank goes down white-on-blue, not themed
        run_keys(&mut session, &[0x1E, 0x0E]);
        assert_eq!(session.pending_input(), "");
        let cursor = session.console().cursor();
        let surface = session.console().surface();
        assert_eq!(surface.glyphs[cursor], b' ');
        assert_eq!(surface.attrs[cursor], WHITE_ON_BLUE);
    }

    #[test]
    fn test_delete_blanks_under_cursor_without_moving() {
        let mut session = new_session();
        run_keys(&mut session, &[0x1E]); // 'a'
        let before = session.console().cursor();
        run_keys(&mut session, &[0x53]); // delete
        assert_eq!(session.console().cursor(), before);
        assert_eq!(session.pending_input(), "a");
        assert_eq!(session.console().surface().glyphs[before], b' ');
    }

    #[test]
    fn test_line_overflow_drops_silently() {
        let mut session = new_session();
        for _ in 0..300 {
            run_keys(&mut session, &[0x1E]); // 'a'
        }
        assert_eq!(session.pending_input().len(), 254);
        // the dropped keystrokes were not echoed either
        assert_eq!(
            session.console().cursor(),
            INPUT_START_ROW * COLS + 254
        );
    }

    #[test]
    fn test_enter_submits_and_clears_line() {
        let mut session = new_session();
        // 'c' 'l' 's' enter
        let exec = run_keys(&mut session, &[0x2E, 0x26, 0x1F, 0x1C]);
        assert_eq!(exec, Exec::Continue);
        assert_eq!(session.pending_input(), "");
        // cls cleared the grid, then submission dropped to the next row
        assert_eq!(session.console().cursor_row(), INPUT_START_ROW + 1);
        assert!(session
            .console()
            .surface()
            .glyphs
            .iter()
            .all(|&g| g == b' '));
    }

    #[test]
    fn test_unknown_command_reports() {
        let mut session = new_session();
        session.execute("frobnicate");
        assert!(screen_contains(&session, "Unknown command!"));
    }

    #[test]
    fn test_empty_line_reports_unknown() {
        let mut session = new_session();
        session.execute("");
        assert!(screen_contains(&session, "Unknown command!"));
    }

    #[test]
    fn test_setcolor_applies_until_changed() {
        let mut session = new_session();
        session.execute("setcolor yellow dark_gray");
        assert_eq!(session.console().theme().fg, Color::Yellow);
        assert_eq!(session.console().theme().bg, Color::DarkGray);
        let attr = Color::attr(Color::Yellow, Color::DarkGray);
        assert!(session.console().surface().attrs.iter().all(|&a| a == attr));
        assert!(screen_contains(&session, "Color updated!"));
    }

    #[test]
    fn test_setcolor_invalid_names_leave_theme_alone() {
        let mut session = new_session();
        session.execute("setcolor teal white");
        assert_eq!(session.console().theme().fg, Color::White);
        assert_eq!(session.console().theme().bg, Color::Blue);
        assert!(screen_contains(&session, "Invalid color names!"));
    }

    #[test]
    fn test_tictactoe_renders_board() {
        let mut session = new_session();
        session.execute("tictactoe");
        assert!(screen_contains(&session, "Tic-Tac-Toe started!"));
        assert!(screen_contains(&session, "---|---|---"));
        assert!(session.game().is_board_empty());
    }

    #[test]
    fn test_move_on_taken_cell_is_rejected() {
        let mut session = new_session();
        session.execute("tictactoe");
        session.execute("move 1 1");
        session.execute("move 1 1");
        assert!(screen_contains(&session, "Position already taken!"));
        // X's mark stands, O is still to play
        assert_eq!(session.game().cell(0, 0), Some(Player::X));
        assert_eq!(session.game().current(), Player::X.other());
    }

    #[test]
    fn test_move_out_of_range_is_rejected() {
        let mut session = new_session();
        session.execute("tictactoe");
        session.execute("move 4 1");
        assert!(screen_contains(&session, "Invalid position!"));
        assert!(session.game().is_board_empty());
    }

    #[test]
    fn test_win_announces_and_resets_to_x() {
        let mut session = new_session();
        session.execute("tictactoe");
        session.execute("move 1 1"); // X
        session.execute("move 2 1"); // O
        session.execute("move 1 2"); // X
        session.execute("move 2 2"); // O
        session.execute("move 1 3"); // X wins the top row
        assert!(screen_contains(&session, "Player X wins!"));
        assert!(session.game().is_board_empty());
        assert_eq!(session.game().current(), Player::X);
    }

    #[test]
    fn test_calc_prints_result() {
        let mut session = new_session();
        session.execute("calc 7 * 6");
        assert!(screen_contains(&session, "Result: 42"));
    }

    #[test]
    fn test_calc_divide_by_zero_prints_no_result() {
        let mut session = new_session();
        session.execute("calc 10 / 0");
        assert!(screen_contains(&session, "Error: Division by zero!"));
        assert!(!screen_contains(&session, "Result:"));
    }

    #[test]
    fn test_vars_capacity_and_order() {
        let mut session = new_session();
        for i in 0..10 {
            session.execute(&format!("createvar v{} {}", i, i));
        }
        session.execute("createvar overflow 11");
        assert!(screen_contains(&session, "Variable limit reached!"));
        assert_eq!(session.vars().len(), 10);

        let mut session = new_session();
        session.execute("var one 1");
        session.execute("var two 2");
        session.execute("var three 3");
        session.execute("cls");
        session.execute("showvars");
        let surface = session.console().surface();
        let row = INPUT_START_ROW;
        assert!(surface.row_text(row).starts_with("one = 1"));
        assert!(surface.row_text(row + 1).starts_with("two = 2"));
        assert!(surface.row_text(row + 2).starts_with("three = 3"));
    }

    #[test]
    fn test_sysinfo_prints_hardware_facts() {
        let mut session = new_session();
        session.execute("sysinfo");
        assert!(screen_contains(&session, "System Information:"));
        assert!(screen_contains(&session, "GenuineIntel"));
        assert!(screen_contains(&session, "Memory: 640 KB"));
    }

    #[test]
    fn test_fill_paints_rectangle() {
        let mut session = new_session();
        session.execute("fill # green black 2 3");
        let surface = session.console().surface();
        assert!(surface.row_text(0).starts_with("###"));
        assert!(surface.row_text(1).starts_with("###"));
        assert!(surface.row_text(2).starts_with("   "));
        assert_eq!(surface.attrs[0], Color::attr(Color::Green, Color::Black));
    }

    #[test]
    fn test_setsplash_changes_banner() {
        let mut session = new_session();
        session.execute("setsplash hello");
        assert_eq!(session.console().theme().banner, "hello");
        session.draw_banner();
        let col = (COLS - 5) / 2;
        assert_eq!(
            &session.console().surface().row_text(0)[col..col + 5],
            "hello"
        );
    }

    #[test]
    fn test_setcolorsplash_changes_banner_color() {
        let mut session = new_session();
        session.execute("setcolorsplash light_cyan");
        assert_eq!(session.console().theme().splash_fg, Color::LightCyan);
        session.draw_banner();
        let col = (COLS - session.console().theme().banner.len()) / 2;
        assert_eq!(
            session.console().surface().attrs[col],
            Color::attr(Color::LightCyan, Color::Blue)
        );
    }

    #[test]
    fn test_printcolortext_uses_named_color() {
        let mut session = new_session();
        session.execute("printcolortext light_red warning");
        let start = INPUT_START_ROW * COLS;
        let surface = session.console().surface();
        assert!(surface.row_text(INPUT_START_ROW).starts_with("warning"));
        assert_eq!(surface.attrs[start], Color::attr(Color::LightRed, Color::Blue));
    }

    #[test]
    fn test_shutdown_signals_halt() {
        let mut session = new_session();
        assert_eq!(session.execute("shutdown"), Exec::Shutdown);
        assert!(screen_contains(&session, "System shutting down..."));
    }

    #[test]
    fn test_pause_signals_wait() {
        let mut session = new_session();
        assert_eq!(session.execute("pause"), Exec::Pause);
    }

    #[test]
    fn test_pause_consumes_the_wakeup_key() {
        let mut session = new_session();
        // p-a-u-s-e typed, enter, then the key that ends the pause
        let exec = run_keys(
            &mut session,
            &[0x19, 0x1E, 0x16, 0x1F, 0x12, 0x1C, 0x1E],
        );
        assert_eq!(exec, Exec::Continue);
        // the wakeup 'a' was swallowed, not typed into the next line
        assert_eq!(session.pending_input(), "");
    }
}
