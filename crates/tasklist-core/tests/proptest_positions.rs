use proptest::prelude::*;
use std::collections::BTreeSet;
use tasklist_core::{MemoryRepository, NewTask, Task, TaskService, ToDoItem};

use generators::*;

fn item_positions(task: &Task) -> Vec<u32> {
    task.items().iter().map(ToDoItem::position).collect()
}

fn dense(len: usize) -> Vec<u32> {
    (1..=u32::try_from(len).unwrap()).collect()
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    #[test]
    fn item_positions_stay_dense(ops in prop::collection::vec(arb_item_op(), 0..40)) {
        let mut task = Task::create(NewTask::new("prop", t0()), &clock()).unwrap();

        for op in ops {
            let len = task.todo_count();
            match op {
                ItemOp::Add(text) => {
                    let assigned = task.add_item(ToDoItem::create(text, &clock()).unwrap());
                    prop_assert_eq!(assigned as usize, len + 1);
                }
                ItemOp::Remove(i) if len > 0 => {
                    let guid = task.items()[i % len].guid().to_string();
                    task.remove_item(&guid).unwrap();
                }
                ItemOp::Reorder(i, to) if len > 0 => {
                    let guid = task.items()[i % len].guid().to_string();
                    task.reorder_item(&guid, to).unwrap();
                    let expected = usize::try_from(to.clamp(1, i64::try_from(len).unwrap())).unwrap();
                    prop_assert_eq!(task.item(&guid).unwrap().position() as usize, expected);
                }
                ItemOp::Complete(i) if len > 0 => {
                    let position = u32::try_from(i % len + 1).unwrap();
                    task.item_at_mut(position).unwrap().mark_complete(&clock());
                }
                _ => {}
            }
            prop_assert_eq!(item_positions(&task), dense(task.todo_count()));
        }
    }

    #[test]
    fn reorder_keeps_the_same_items(texts in prop::collection::vec("[a-z]{1,6}", 1..10), from in any::<usize>(), to in -2_i64..14) {
        let mut task = Task::create(NewTask::new("prop", t0()), &clock()).unwrap();
        for text in &texts {
            task.add_item(ToDoItem::create(text.clone(), &clock()).unwrap());
        }
        let before: BTreeSet<String> = task.items().iter().map(|i| i.guid().to_string()).collect();
        let guid = task.items()[from % texts.len()].guid().to_string();

        task.reorder_item(&guid, to).unwrap();

        let after: BTreeSet<String> = task.items().iter().map(|i| i.guid().to_string()).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn task_positions_stay_dense(ops in prop::collection::vec(arb_task_op(), 0..30)) {
        let mut svc = TaskService::with_clock(MemoryRepository::new(), clock());

        for op in ops {
            let tasks = svc.get_all().unwrap();
            let len = tasks.len();
            match op {
                TaskOp::Create { title, position } => {
                    svc.create_task(NewTask::new(title, t0()).at_position(position)).unwrap();
                }
                TaskOp::Delete(i) if len > 0 => {
                    svc.delete(tasks[i % len].guid()).unwrap();
                }
                TaskOp::Move(i, to) if len > 0 => {
                    let moved = svc.move_task(tasks[i % len].guid(), to).unwrap();
                    let expected = to.clamp(1, i64::try_from(len).unwrap());
                    prop_assert_eq!(i64::from(moved.position()), expected);
                }
                _ => {}
            }

            let mut positions: Vec<u32> = svc.get_all().unwrap().iter().map(Task::position).collect();
            positions.sort_unstable();
            prop_assert_eq!(positions, dense(svc.count().unwrap()));
        }
    }

    #[test]
    fn due_soon_matches_window(deadlines in prop::collection::vec(arb_deadline(), 0..20), days in 0_u32..10) {
        let mut svc = TaskService::with_clock(MemoryRepository::new(), clock());
        for (n, deadline) in deadlines.iter().enumerate() {
            svc.create_task(NewTask::new(format!("t{n}"), *deadline)).unwrap();
        }
        let horizon = t0() + chrono::Duration::days(i64::from(days));
        let due = svc.filter_due_soon(days, None).unwrap();
        let expected = deadlines.iter().filter(|d| **d >= t0() && **d <= horizon).count();
        prop_assert_eq!(due.len(), expected);
    }
}
