#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::element::{Attrs, remember_element_ref};
    use crate::locals::{try_local, with_local};
    use crate::runtime::{COMPOSER, CompositionHost, remember, remember_with_key};
    use crate::scope::Scope;
    use crate::view::View;
    use crate::{mount_effect, on_unmount};

    #[test]
    fn scope_disposes_once_in_reverse_order() {
        let order = Rc::new(RefCell::new(Vec::new()));

        let scope = Scope::new();
        for tag in ["a", "b", "c"] {
            let order = order.clone();
            scope.add_disposer(move || order.borrow_mut().push(tag));
        }

        scope.dispose();
        assert_eq!(*order.borrow(), vec!["c", "b", "a"]);
    }

    #[test]
    fn scope_drop_runs_pending_disposers() {
        let ran = Rc::new(RefCell::new(false));
        {
            let scope = Scope::new();
            let ran = ran.clone();
            scope.add_disposer(move || *ran.borrow_mut() = true);
        }
        assert!(*ran.borrow());
    }

    #[test]
    fn child_scopes_dispose_before_parent() {
        let order = Rc::new(RefCell::new(Vec::new()));

        let parent = Scope::new();
        {
            let order = order.clone();
            parent.add_disposer(move || order.borrow_mut().push("parent"));
        }
        let child = parent.child();
        {
            let order = order.clone();
            child.add_disposer(move || order.borrow_mut().push("child"));
        }

        parent.dispose();
        assert_eq!(*order.borrow(), vec!["child", "parent"]);
    }

    #[test]
    fn remember_initializes_once_per_slot() {
        let mut host = CompositionHost::new();
        let calls = Rc::new(RefCell::new(0));

        for _ in 0..3 {
            let calls = calls.clone();
            host.compose(move || {
                let value = remember(move || {
                    *calls.borrow_mut() += 1;
                    7
                });
                assert_eq!(*value, 7);
                Ok(View::container(Attrs::new()))
            })
            .unwrap();
        }

        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn key_based_remember_keeps_first_value() {
        COMPOSER.with(|c| c.borrow_mut().keyed_slots.clear());

        let first = remember_with_key("k", || 42);
        let second = remember_with_key("k", || 100);

        assert_eq!(*first, 42);
        assert_eq!(*second, 42);
    }

    #[test]
    fn locals_restore_on_frame_exit() {
        #[derive(Clone, PartialEq, Debug)]
        struct Mark(u32);

        let inner = with_local(Mark(1), || {
            let nested = with_local(Mark(2), || try_local::<Mark>());
            assert_eq!(nested, Some(Mark(2)));
            try_local::<Mark>()
        });

        assert_eq!(inner, Some(Mark(1)));
        assert_eq!(try_local::<Mark>(), None);
    }

    #[test]
    fn mount_effect_runs_after_commit_and_cleans_up_on_unmount() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut host = CompositionHost::new();

        {
            let log = log.clone();
            host.compose(move || {
                let target = remember_element_ref();
                assert!(target.get().is_none(), "unresolved before first commit");
                {
                    let log = log.clone();
                    let target = target.clone();
                    mount_effect((), move || {
                        assert!(target.get().is_some(), "resolved by flush time");
                        log.borrow_mut().push("mount");
                        let log = log.clone();
                        Ok(on_unmount(move || log.borrow_mut().push("cleanup")))
                    });
                }
                Ok(View::container(Attrs::new()).element_ref(target))
            })
            .unwrap();
        }

        assert_eq!(*log.borrow(), vec!["mount"]);
        host.unmount();
        assert_eq!(*log.borrow(), vec!["mount", "cleanup"]);
    }

    #[test]
    fn mount_effect_reruns_only_on_key_change() {
        let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let mut host = CompositionHost::new();

        let mut pass = |key: u32| {
            let log = log.clone();
            host.compose(move || {
                {
                    let log = log.clone();
                    mount_effect(key, move || {
                        log.borrow_mut().push(format!("mount {key}"));
                        let log = log.clone();
                        Ok(on_unmount(move || {
                            log.borrow_mut().push(format!("cleanup {key}"))
                        }))
                    });
                }
                Ok(View::container(Attrs::new()))
            })
            .unwrap();
        };

        pass(1);
        pass(1);
        pass(2);

        assert_eq!(
            *log.borrow(),
            vec!["mount 1", "cleanup 1", "mount 2"],
            "same key is a no-op; a new key cleans up before re-running"
        );
    }

    #[test]
    fn element_ref_is_stable_across_recompositions() {
        let mut host = CompositionHost::new();

        let mut pass = |class: &'static str| {
            host.compose(move || {
                let target = remember_element_ref();
                Ok(View::container(Attrs::new().class(class)).element_ref(target))
            })
            .map(|frame| frame.root)
            .unwrap()
        };

        let first = pass("a");
        let second = pass("b");

        assert_eq!(first, second);
        let element = host.elements().get(second).unwrap();
        assert_eq!(element.attrs.class.as_deref(), Some("b"));
    }

    #[test]
    fn commit_realizes_children_and_prunes_removed_nodes() {
        let mut host = CompositionHost::new();

        let frame = host
            .compose(|| {
                let target = remember_element_ref();
                Ok(View::container(Attrs::new().id("root"))
                    .element_ref(target)
                    .with_children(vec![View::label("caption"), View::container(Attrs::new())]))
            })
            .unwrap();

        {
            let root = host.elements().get(frame.root).unwrap();
            assert_eq!(root.children.len(), 2);
            let caption = host.elements().get(root.children[0]).unwrap();
            assert_eq!(caption.text.as_deref(), Some("caption"));
            assert_eq!(host.elements().len(), 3);
        }

        let frame = host
            .compose(|| {
                let target = remember_element_ref();
                Ok(View::container(Attrs::new().id("root")).element_ref(target))
            })
            .unwrap();

        let root = host.elements().get(frame.root).unwrap();
        assert!(root.children.is_empty());
        assert_eq!(host.elements().len(), 1);
    }

    #[test]
    fn failing_effect_aborts_the_frame() {
        let mut host = CompositionHost::new();

        let result = host.compose(|| {
            mount_effect((), || Err("no device".into()));
            Ok(View::container(Attrs::new()))
        });

        assert!(matches!(result, Err(crate::HostError::Effect(_))));
    }
}
