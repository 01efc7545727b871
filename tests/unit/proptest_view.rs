//! Property-based tests for the task view
//!
//! Uses proptest to check the synchronization rules over generated drafts
//! and task lists rather than a few hand-picked values.

use proptest::prelude::*;
use proptest::sample::Index;
use tasklist::models::Task;
use tasklist::view::{EMPTY_DRAFT_MESSAGE, TaskView, ViewState};

use super::common::{Call, MockTaskApi};

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

/// Tasks with ids 1..=n in server order
fn tasks_from(texts: &[String]) -> Vec<Task> {
    texts
        .iter()
        .zip(1..)
        .map(|(text, id)| Task::new(id, text.as_str()))
        .collect()
}

fn task_texts() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z ]{0,15}", 1..8)
}

proptest! {
    /// Create then list includes a task carrying the trimmed draft
    #[test]
    fn add_then_list_contains_trimmed_draft(
        texts in prop::collection::vec("[a-z]{1,8}", 0..5),
        draft in "[ \t]{0,3}[A-Za-z0-9][A-Za-z0-9 ]{0,20}[ \t]{0,3}",
    ) {
        let trimmed = draft.trim().to_string();
        let (state, calls) = block_on(async {
            let view = TaskView::new(MockTaskApi::with_tasks(tasks_from(&texts)));
            view.submit(draft.as_str()).await.unwrap();
            (view.snapshot(), view.api().calls())
        });

        prop_assert!(state.tasks.iter().any(|t| t.text == trimmed));
        prop_assert_eq!(state.tasks.len(), texts.len() + 1);
        prop_assert_eq!(calls, vec![Call::Create(trimmed), Call::List]);
        prop_assert!(state.draft.is_empty());
    }

    /// An all-whitespace draft never reaches the service
    #[test]
    fn whitespace_draft_makes_no_calls(draft in "[ \t\r\n]{0,12}") {
        let (state, call_count) = block_on(async {
            let view = TaskView::new(MockTaskApi::new());
            let result = view.submit(draft.as_str()).await;
            assert!(result.is_err());
            (view.snapshot(), view.api().call_count())
        });

        prop_assert_eq!(call_count, 0);
        prop_assert_eq!(state.error.as_deref(), Some(EMPTY_DRAFT_MESSAGE));
        prop_assert!(!state.ui.is_adding);
    }

    /// Delete then list never includes the deleted id
    #[test]
    fn delete_then_list_omits_id(texts in task_texts(), pick in any::<Index>()) {
        let tasks = tasks_from(&texts);
        let id = tasks[pick.index(tasks.len())].id;

        let state = block_on(async {
            let view = TaskView::new(MockTaskApi::with_tasks(tasks.clone()));
            view.load().await.unwrap();
            view.delete(id).await.unwrap();
            view.snapshot()
        });

        prop_assert!(state.tasks.iter().all(|t| t.id != id));
        prop_assert_eq!(state.tasks.len(), tasks.len() - 1);
    }

    /// A saved edit changes only the matching task's text
    #[test]
    fn save_edit_changes_only_matching_task(
        texts in task_texts(),
        pick in any::<Index>(),
        new_text in "[ ]{0,2}[a-z][a-z ]{0,15}",
    ) {
        let tasks = tasks_from(&texts);
        let target = tasks[pick.index(tasks.len())].clone();
        let trimmed = new_text.trim().to_string();

        let (state, begun) = ViewState::default()
            .finish_initial_load(Ok(tasks.clone()))
            .start_edit(&target)
            .set_edit_text(new_text.as_str())
            .begin_save_edit();
        let (id, text) = begun.into_result().unwrap().unwrap();
        prop_assert_eq!(id, target.id);
        prop_assert_eq!(&text, &trimmed);

        let state = state.finish_save_edit(id, &text, Ok(target.with_text(text.as_str())));
        for (before, after) in tasks.iter().zip(&state.tasks) {
            if before.id == target.id {
                prop_assert_eq!(&after.text, &trimmed);
            } else {
                prop_assert_eq!(before, after);
            }
        }
        prop_assert_eq!(state.tasks.len(), tasks.len());
        prop_assert_eq!(state.editing_id(), None);
    }

    /// The same holds through the controller, with exactly one update call
    #[test]
    fn view_save_edit_sends_one_update(texts in task_texts(), pick in any::<Index>()) {
        let tasks = tasks_from(&texts);
        let target = tasks[pick.index(tasks.len())].clone();

        let (state, calls) = block_on(async {
            let view = TaskView::new(MockTaskApi::with_tasks(tasks.clone()));
            view.load().await.unwrap();
            view.api().clear_calls();
            view.start_edit_by_id(target.id).unwrap();
            view.set_edit_text("edited");
            view.save_edit().await.unwrap();
            (view.snapshot(), view.api().calls())
        });

        prop_assert_eq!(calls, vec![Call::Update(target.id, "edited".to_string())]);
        let changed: Vec<_> = tasks
            .iter()
            .zip(&state.tasks)
            .filter(|(before, after)| before != after)
            .map(|(before, _)| before.id)
            .collect();
        let expected = if target.text == "edited" { vec![] } else { vec![target.id] };
        prop_assert_eq!(changed, expected);
    }
}
