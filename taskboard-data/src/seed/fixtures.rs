/// Demo dataset inserted on first start
///
/// Literal values are part of the application's contract (UI screenshots and
/// client tests rely on them), so they are kept exactly as first shipped,
/// Polish labels included.
///
/// Task timestamps are offsets from the moment of seeding, not constants.

use chrono::{DateTime, Duration, Months, Utc};
use std::collections::HashSet;
use tracing::warn;
use uuid::Uuid;

use crate::auth::password::CredentialHasher;
use crate::error::{StoreError, StoreResult};
use crate::models::{Board, Task, User};

/// Marker name recorded in `seed_history`
pub const SEED_NAME: &str = "taskboard-demo-v1";

/// A board row with a fixed ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardFixture {
    pub id: i32,
    pub name: &'static str,
}

pub const OPEN_BOARD: BoardFixture = BoardFixture {
    id: 1,
    name: "Nowe zadanie",
};

pub const IN_PROGRESS_BOARD: BoardFixture = BoardFixture {
    id: 2,
    name: "W trakcie realizacji",
};

pub const DONE_BOARD: BoardFixture = BoardFixture {
    id: 3,
    name: "Gotowe",
};

/// Shares its ID with [`DONE_BOARD`] and is therefore never persisted
pub const TESTS_BOARD: BoardFixture = BoardFixture {
    id: 3,
    name: "Testy",
};

/// Every board the fixture constructs, in declaration order
pub const BOARDS: [BoardFixture; 4] = [OPEN_BOARD, IN_PROGRESS_BOARD, DONE_BOARD, TESTS_BOARD];

/// The guest account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserFixture {
    pub user_name: &'static str,
    pub normalized_user_name: &'static str,
    pub email: &'static str,
    pub normalized_email: &'static str,
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub password: &'static str,
}

pub const GUEST_USER: UserFixture = UserFixture {
    user_name: "gosc",
    normalized_user_name: "gosc",
    email: "gosc@mail.com",
    normalized_email: "gosc@MAIL.COM",
    first_name: "gosc",
    last_name: "gosc",
    password: "gosc",
};

/// How far before the seeding moment a task was "created"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatedAgo {
    Days(i64),
    Months(u32),
    Years(u32),
}

impl CreatedAgo {
    /// Resolves the offset against `anchor`
    ///
    /// Calendar arithmetic clamps to the end of shorter months. Falls back to
    /// `anchor` only if the result would leave chrono's representable range.
    pub fn before(&self, anchor: DateTime<Utc>) -> DateTime<Utc> {
        let resolved = match *self {
            CreatedAgo::Days(days) => anchor.checked_sub_signed(Duration::days(days)),
            CreatedAgo::Months(months) => anchor.checked_sub_months(Months::new(months)),
            CreatedAgo::Years(years) => {
                anchor.checked_sub_months(Months::new(years.saturating_mul(12)))
            }
        };
        resolved.unwrap_or(anchor)
    }
}

/// A task row with a fixed ID, owned by the guest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskFixture {
    pub id: i32,
    pub title: &'static str,
    pub description: &'static str,
    pub created: CreatedAgo,
    pub board_id: i32,
}

pub const TASKS: [TaskFixture; 4] = [
    TaskFixture {
        id: 1,
        title: "Style CSS",
        description: "Poprawić wygląd interfejsu",
        created: CreatedAgo::Days(200),
        board_id: OPEN_BOARD.id,
    },
    TaskFixture {
        id: 2,
        title: "Stworzyć aplikacje na androida",
        description: "Napisać aplikacje np w Javie i podłączyć do gotowego API",
        created: CreatedAgo::Months(5),
        board_id: OPEN_BOARD.id,
    },
    TaskFixture {
        id: 3,
        title: "Klient dla Windowsa",
        description: "Przygotować aplikacje na Windowsa np w C# albo VB",
        created: CreatedAgo::Months(1),
        board_id: IN_PROGRESS_BOARD.id,
    },
    TaskFixture {
        id: 4,
        title: "Dodać nowe zadania",
        description: "Zadania możesz przenosić między zakładkami dzięki edycji zadania",
        created: CreatedAgo::Years(1),
        board_id: DONE_BOARD.id,
    },
];

/// Concrete rows ready for insertion
#[derive(Debug, Clone)]
pub struct SeedData {
    /// Boards that will be inserted
    pub boards: Vec<Board>,

    /// Boards constructed but dropped because their ID was already taken
    pub excluded_boards: Vec<Board>,

    /// The guest account, password already hashed
    pub guest: User,

    /// Tasks, all owned by `guest`
    pub tasks: Vec<Task>,
}

impl SeedData {
    /// Materializes the fixtures relative to `anchor`
    ///
    /// Boards are deduplicated by ID, first declaration wins. The guest
    /// password is hashed once here.
    ///
    /// # Errors
    ///
    /// - `Credential` if hashing fails
    /// - `ConstraintViolation` if a task points at a board that isn't inserted
    pub fn build(anchor: DateTime<Utc>, hasher: &dyn CredentialHasher) -> StoreResult<Self> {
        let mut seen = HashSet::new();
        let mut boards = Vec::new();
        let mut excluded_boards = Vec::new();

        for fixture in BOARDS {
            let board = Board {
                id: fixture.id,
                name: fixture.name.to_string(),
            };

            if seen.insert(fixture.id) {
                boards.push(board);
            } else {
                warn!(
                    board_id = fixture.id,
                    board_name = fixture.name,
                    "Seed board shares an ID with an earlier board, skipping it"
                );
                excluded_boards.push(board);
            }
        }

        let guest = User {
            id: Uuid::new_v4(),
            user_name: GUEST_USER.user_name.to_string(),
            normalized_user_name: GUEST_USER.normalized_user_name.to_string(),
            email: GUEST_USER.email.to_string(),
            normalized_email: GUEST_USER.normalized_email.to_string(),
            first_name: GUEST_USER.first_name.to_string(),
            last_name: GUEST_USER.last_name.to_string(),
            password_hash: hasher.hash(GUEST_USER.password)?,
        };

        let tasks = TASKS
            .iter()
            .map(|fixture| Task {
                id: fixture.id,
                title: fixture.title.to_string(),
                description: fixture.description.to_string(),
                created_on: fixture.created.before(anchor),
                owner_id: guest.id,
                board_id: fixture.board_id,
            })
            .collect();

        let data = Self {
            boards,
            excluded_boards,
            guest,
            tasks,
        };
        data.check_references()?;
        Ok(data)
    }

    /// Every task must point at an inserted board and at the guest
    fn check_references(&self) -> StoreResult<()> {
        for task in &self.tasks {
            if !self.boards.iter().any(|b| b.id == task.board_id) {
                return Err(StoreError::constraint(format!(
                    "seed task {} references board {} which is not seeded",
                    task.id, task.board_id
                )));
            }
            if task.owner_id != self.guest.id {
                return Err(StoreError::constraint(format!(
                    "seed task {} is not owned by the guest user",
                    task.id
                )));
            }
        }
        Ok(())
    }
}
