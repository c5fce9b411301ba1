use prep_core::model::VisualKind;

/// One frame of a topic illustration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisualFrame {
    pub caption: &'static str,
    pub art: &'static str,
}

/// Stepped illustration shown at the top of a topic page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TopicVisualVm {
    pub title: &'static str,
    pub frames: &'static [VisualFrame],
}

const fn frame(caption: &'static str, art: &'static str) -> VisualFrame {
    VisualFrame { caption, art }
}

const WINDOW: &[VisualFrame] = &[
    frame("Window opens on index 1", " 0 [1] 0  1  1  0\n    ^ start/end"),
    frame("Expand right while valid", " 0 [1  0  1] 1  0\n    ^start  ^end"),
    frame("Shrink left when the constraint breaks", " 0  1 [0  1  1] 0\n       ^start ^end"),
];

const GRAPH: &[VisualFrame] = &[
    frame("Dependency graph (DAG)", "(A) --> (B) --> (C)"),
    frame("A has no prerequisites: start there", "[A] --> (B) --> (C)\nqueue: A"),
    frame("A must complete before B", "[A] --> [B] --> (C)\norder: A, B"),
    frame("Topological order found", "[A] --> [B] --> [C]\norder: A, B, C"),
];

const HEAP: &[VisualFrame] = &[
    frame("Max heap: parent >= children", "     (10)\n    /    \\\n  (8)    (5)"),
    frame("Push 12 at the next free leaf", "     (10)\n    /    \\\n  (8)    (5)\n  /\n(12)"),
    frame("Sift up: 12 swaps past 8 and 10", "     (12)\n    /    \\\n (10)    (5)\n  /\n (8)"),
];

const LLD_PARKING: &[VisualFrame] = &[
    frame("UML: singleton entry point", "+----------------+\n| ParkingLot     |\n| + getInstance()|\n+----------------+"),
    frame("Lot owns levels", "ParkingLot\n    |\n    +-- Level\n          - spots: List"),
    frame("Levels own spots, spots hold vehicles", "Level -- Spot [Compact|Large|Handicapped]\n              \\-- Vehicle"),
];

const STAR_METHOD: &[VisualFrame] = &[
    frame("Situation", "[S] context, stakes, constraints"),
    frame("Task", "[T] what you owned"),
    frame("Action", "[A] what *you* did, step by step"),
    frame("Result", "[R] metrics, impact, what you learned"),
];

const DB: &[VisualFrame] = &[
    frame("SQL: fixed schema, rows and joins", "+----+------+\n| id | name |\n+----+------+\n|  1 | Ada  |\n+----+------+"),
    frame("NoSQL: documents keyed for access patterns", "{ \"pk\": \"user#1\",\n  \"name\": \"Ada\",\n  \"orders\": [ ... ] }"),
];

const NETWORK: &[VisualFrame] = &[
    frame("Client opens TCP", "Client --SYN--> Server"),
    frame("TLS handshake", "Client <--cert-- Server\nClient --key--> Server"),
    frame("HTTPS request over the secure channel", "Client ==GET /==> Server\nClient <==200==  Server"),
];

const OS: &[VisualFrame] = &[
    frame("Process: own address space", "[Process A] heap | stack | code\n[Process B] heap | stack | code"),
    frame("Threads share one address space", "[Process]\n  heap (shared)\n  T1 stack | T2 stack"),
    frame("Context switch saves registers", "T1 --save--> PCB --load--> T2"),
];

impl TopicVisualVm {
    #[must_use]
    pub fn for_kind(kind: VisualKind) -> Option<Self> {
        let (title, frames) = match kind {
            VisualKind::Window => ("Dynamic Window", WINDOW),
            VisualKind::Graph => ("Dependency Graph (DAG)", GRAPH),
            VisualKind::Heap => ("Max Heap", HEAP),
            VisualKind::LldParking => ("UML Class Diagram", LLD_PARKING),
            VisualKind::StarMethod => ("STAR Method", STAR_METHOD),
            VisualKind::Db => ("SQL vs NoSQL", DB),
            VisualKind::Network => ("Client ⇄ Server", NETWORK),
            VisualKind::Os => ("Processes & Threads", OS),
            VisualKind::None => return None,
        };
        Some(Self { title, frames })
    }
}
