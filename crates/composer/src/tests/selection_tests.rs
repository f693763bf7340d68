use super::*;

struct Fixture {
    registry: WordRegistry,
    spec: PoemSpecification,
    machine: SelectionStateMachine,
    words: Vec<WordId>,
}

impl Fixture {
    fn with_words(count: usize) -> Self {
        let mut registry = WordRegistry::new();
        let words = (0..count).map(|_| registry.add_word()).collect();
        Self {
            registry,
            spec: PoemSpecification::new(),
            machine: SelectionStateMachine::new(),
            words,
        }
    }

    fn send(&mut self, event: SelectionEvent) -> Result<Transition, ComposerError> {
        self.machine.handle(event, &self.registry, &mut self.spec)
    }
}

#[test]
fn normal_mode_click_opens_the_word_menu() {
    let mut fx = Fixture::with_words(2);
    let w0 = fx.words[0];

    let transition = fx.send(SelectionEvent::activated(w0)).expect("click");

    assert_eq!(transition, Transition::OpenMenu(w0));
    assert_eq!(fx.machine.mode(), Mode::Normal);
    assert!(fx.machine.allows_menu_toggle());
}

#[test]
fn choosing_a_device_enters_linking_mode() {
    let mut fx = Fixture::with_words(2);
    let w0 = fx.words[0];

    let transition = fx
        .send(SelectionEvent::device_menu(w0, Device::Rhyme))
        .expect("menu");

    assert_eq!(
        transition,
        Transition::SessionStarted {
            anchor: w0,
            device: Device::Rhyme,
            abandoned: None,
        }
    );
    assert_eq!(
        fx.machine.mode(),
        Mode::LinkingDevice {
            anchor: w0,
            device: Device::Rhyme,
        }
    );
    assert!(!fx.machine.allows_menu_toggle());
}

#[test]
fn clicking_the_anchor_ends_the_session_without_linking() {
    let mut fx = Fixture::with_words(1);
    let w = fx.words[0];

    fx.send(SelectionEvent::device_menu(w, Device::Rhyme))
        .expect("menu");
    let transition = fx.send(SelectionEvent::activated(w)).expect("click");

    assert_eq!(transition, Transition::SessionEnded { anchor: w });
    assert_eq!(fx.machine.mode(), Mode::Normal);
    assert!(fx.spec.is_empty());
}

#[test]
fn one_session_links_several_targets_in_click_order() {
    let mut fx = Fixture::with_words(3);
    let (w1, w2, w3) = (fx.words[0], fx.words[1], fx.words[2]);

    fx.send(SelectionEvent::device_menu(w1, Device::Rhyme))
        .expect("menu");
    fx.send(SelectionEvent::activated(w3)).expect("click w3");
    fx.send(SelectionEvent::activated(w2)).expect("click w2");
    fx.send(SelectionEvent::activated(w1)).expect("click anchor");

    assert_eq!(fx.spec.linked(Device::Rhyme), &[w3, w2]);
    assert!(!fx.spec.contains(Device::Rhyme, w1));
    assert_eq!(fx.machine.mode(), Mode::Normal);
}

#[test]
fn repeated_target_click_is_reported_as_already_linked() {
    let mut fx = Fixture::with_words(2);
    let (w0, w1) = (fx.words[0], fx.words[1]);

    fx.send(SelectionEvent::device_menu(w0, Device::Alliteration))
        .expect("menu");
    let first = fx.send(SelectionEvent::activated(w1)).expect("first");
    let second = fx.send(SelectionEvent::activated(w1)).expect("second");

    assert_eq!(
        first,
        Transition::Linked {
            device: Device::Alliteration,
            word_id: w1,
        }
    );
    assert_eq!(
        second,
        Transition::AlreadyLinked {
            device: Device::Alliteration,
            word_id: w1,
        }
    );
    assert_eq!(fx.spec.linked(Device::Alliteration), &[w1]);
}

#[test]
fn choosing_another_menu_abandons_the_open_session() {
    let mut fx = Fixture::with_words(3);
    let (w0, w1, w2) = (fx.words[0], fx.words[1], fx.words[2]);

    fx.send(SelectionEvent::device_menu(w0, Device::Rhyme))
        .expect("menu w0");
    let transition = fx
        .send(SelectionEvent::device_menu(w1, Device::Alliteration))
        .expect("menu w1");
    fx.send(SelectionEvent::activated(w2)).expect("click w2");

    assert_eq!(
        transition,
        Transition::SessionStarted {
            anchor: w1,
            device: Device::Alliteration,
            abandoned: Some(w0),
        }
    );
    assert!(fx.spec.linked(Device::Rhyme).is_empty());
    assert_eq!(fx.spec.linked(Device::Alliteration), &[w2]);
}

#[test]
fn switching_device_on_the_same_anchor_keeps_the_marker() {
    let mut fx = Fixture::with_words(1);
    let w0 = fx.words[0];

    fx.send(SelectionEvent::device_menu(w0, Device::Rhyme))
        .expect("rhyme");
    let transition = fx
        .send(SelectionEvent::device_menu(w0, Device::Alliteration))
        .expect("alliteration");

    assert_eq!(
        transition,
        Transition::SessionStarted {
            anchor: w0,
            device: Device::Alliteration,
            abandoned: None,
        }
    );
}

#[test]
fn reselecting_the_active_session_is_a_no_op() {
    let mut fx = Fixture::with_words(1);
    let w0 = fx.words[0];

    fx.send(SelectionEvent::device_menu(w0, Device::Rhyme))
        .expect("menu");
    let before = fx.machine.mode();
    let transition = fx
        .send(SelectionEvent::device_menu(w0, Device::Rhyme))
        .expect("menu again");

    assert_eq!(transition, Transition::SessionUnchanged);
    assert_eq!(fx.machine.mode(), before);
}

#[test]
fn unknown_device_is_rejected_and_mode_is_kept() {
    let mut fx = Fixture::with_words(2);
    let (w0, w1) = (fx.words[0], fx.words[1]);
    fx.send(SelectionEvent::device_menu(w0, Device::Rhyme))
        .expect("menu");

    let err = fx
        .send(SelectionEvent::DeviceMenuChosen {
            word_id: w1,
            device: "assonance".into(),
        })
        .expect_err("must reject");

    assert_eq!(err, ComposerError::InvalidDevice("assonance".into()));
    assert!(!err.is_silent());
    assert_eq!(
        fx.machine.mode(),
        Mode::LinkingDevice {
            anchor: w0,
            device: Device::Rhyme,
        }
    );
    assert!(fx.spec.is_empty());
}

#[test]
fn stale_word_activation_mutates_nothing() {
    let mut fx = Fixture::with_words(2);
    let (w0, w1) = (fx.words[0], fx.words[1]);
    fx.send(SelectionEvent::device_menu(w0, Device::Rhyme))
        .expect("menu");
    fx.send(SelectionEvent::activated(w1)).expect("link");
    let spec_before = fx.spec.clone();
    let mode_before = fx.machine.mode();

    let err = fx
        .send(SelectionEvent::activated(WordId(99)))
        .expect_err("stale");

    assert_eq!(err, ComposerError::StaleWordReference(WordId(99)));
    assert!(err.is_silent());
    assert_eq!(fx.spec, spec_before);
    assert_eq!(fx.machine.mode(), mode_before);
}

#[test]
fn forget_word_only_resets_for_the_anchor() {
    let mut fx = Fixture::with_words(2);
    let (w0, w1) = (fx.words[0], fx.words[1]);
    fx.send(SelectionEvent::device_menu(w0, Device::Rhyme))
        .expect("menu");

    assert_eq!(fx.machine.forget_word(w1), None);
    assert_eq!(fx.machine.anchor(), Some(w0));
    assert_eq!(fx.machine.forget_word(w0), Some(w0));
    assert_eq!(fx.machine.mode(), Mode::Normal);
}
