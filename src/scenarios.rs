//! Built-in self-checking scripts run by `svec --test`.

/// A named script whose `expect`/`capacity` lines make it self-checking.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub source: &'static str,
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "reserve_push_insert",
        source: "
            reserve 10
            expect
            capacity 10
            push 1
            push 2
            push 3
            push 4
            push 5
            capacity 10
            insert 2 99
            expect 1 2 99 3 4 5
            capacity 10
        ",
    },
    Scenario {
        name: "resize_fills_defaults",
        source: "
            push 1
            push 2
            push 3
            shrink
            capacity 3
            resize 5
            expect 1 2 3 0 0
            capacity 6
        ",
    },
    Scenario {
        name: "append_growth_doubles",
        source: "
            push 1
            capacity 1
            push 2
            capacity 2
            push 3
            capacity 4
            push 4
            push 5
            capacity 8
        ",
    },
    Scenario {
        name: "clear_keeps_capacity",
        source: "
            push 1
            push 2
            push 3
            clear
            expect
            capacity 4
            push 7
            push 8
            push 9
            push 10
            capacity 4
            expect 7 8 9 10
        ",
    },
    Scenario {
        name: "erase_undoes_insert",
        source: "
            push 1
            push 2
            push 3
            insert 0 9
            erase 0
            insert 3 9
            erase 3
            expect 1 2 3
        ",
    },
    Scenario {
        name: "insert_at_growth_threshold",
        source: "
            reserve 2
            push 1
            push 2
            insert 1 5
            expect 1 5 2
            capacity 4
        ",
    },
    Scenario {
        name: "pop_and_erase_keep_capacity",
        source: "
            reserve 8
            push 1
            push 2
            push 3
            pop
            erase 0
            expect 2
            capacity 8
            at 0
        ",
    },
];
