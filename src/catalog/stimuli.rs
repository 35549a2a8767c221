use serde::Serialize;

/// One perceptual cue revealed after a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stimulus {
    pub label: &'static str,
    pub meaning: &'static str,
    pub image_source: &'static str,
}

const fn stimulus(label: &'static str, meaning: &'static str, image_source: &'static str) -> Stimulus {
    Stimulus {
        label,
        meaning,
        image_source,
    }
}

pub static STIMULI: [Stimulus; 25] = [
    stimulus(
        "Suspicion",
        "Narrowed eyes and lowered brows often signal a lack of trust.",
        "https://images.unsplash.com/photo-1542080681-b52d382482b0?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Contempt",
        "Asymmetric lip tightening can indicate a sense of superiority.",
        "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Surprise",
        "Raised eyebrows and widened eyes signal a sudden shift in attention.",
        "https://images.unsplash.com/photo-1554151228-14d9def656e4?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Engagement",
        "Leaning in and maintaining soft eye contact shows active interest.",
        "https://images.unsplash.com/photo-1494790108377-be9c29b29330?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Doubt",
        "A slight head tilt and pursed lips often precede a question.",
        "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Authority",
        "A steady, level gaze and upright posture command presence.",
        "https://images.unsplash.com/photo-1506794778202-cad84cf45f1d?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Discomfort",
        "Touching the neck or adjusting clothing are common self-soothing cues.",
        "https://images.unsplash.com/photo-1534528741775-53994a69daeb?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Sadness",
        "Drooping upper eyelids and loss of focus in the eyes signal withdrawal.",
        "https://images.unsplash.com/photo-1531746020798-e795c5399c47?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Focus",
        "Dilated pupils and stillness indicate high cognitive load.",
        "https://images.unsplash.com/photo-1519085360753-af0119f7cbe7?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Joy",
        "Muscle movement around the eyes (crow's feet) indicates a genuine smile.",
        "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Hesitation",
        "Rapid blinking can indicate internal conflict or anxiety.",
        "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Anger",
        "Pursed lips and a focused glare show building frustration.",
        "https://images.unsplash.com/photo-1539571696357-5a69c17a67c6?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Fear",
        "Increased visibility of the whites of the eyes is a universal threat signal.",
        "https://images.unsplash.com/photo-1517841905240-472988babdf9?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Listening",
        "Exposing the ear by tilting the head shows receptive openness.",
        "https://images.unsplash.com/photo-1524504388940-b1c1722653e1?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Disgust",
        "A crinkled nose and raised upper lip signal strong aversion.",
        "https://images.unsplash.com/photo-1488426862026-3ee34a7d66df?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Defiance",
        "Raising the chin makes the neck vulnerable, signaling lack of fear.",
        "https://images.unsplash.com/photo-1463453091185-61582044d556?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Thought",
        "Fingers touching the chin or lips often accompany deep focus.",
        "https://images.unsplash.com/photo-1509062522246-3755977927d7?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Boredom",
        "A resting head in hands indicates a loss of sensory engagement.",
        "https://images.unsplash.com/photo-1522075469751-3a6694fb2f61?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Interest",
        "Mirrored body language shows a sense of rapport and alignment.",
        "https://images.unsplash.com/photo-1502685104226-ee32379fefbe?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Anxiety",
        "Frequent shifting of the gaze can indicate a search for a way out.",
        "https://images.unsplash.com/photo-1491349174775-aaaf99c9e7aa?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Confidence",
        "An open chest and steady breathing indicate a state of flow.",
        "https://images.unsplash.com/photo-1499952127939-9bbf5af6c51c?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Submission",
        "Looking down and slightly shrinking the posture signals non-aggression.",
        "https://images.unsplash.com/photo-1512485600893-b08ec1d59b1c?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Playfulness",
        "A slight eye squint and relaxed jaw show lighthearted intent.",
        "https://images.unsplash.com/photo-1474176857210-7287d38d27c6?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Observation",
        "A neutral, scanning gaze is used to take in wide social fields.",
        "https://images.unsplash.com/photo-1521119989659-a83eee488004?auto=format&fit=crop&w=400&q=80",
    ),
    stimulus(
        "Calm",
        "Loose shoulders and slow, even blinking signal a settled nervous system.",
        "https://images.unsplash.com/photo-1544005313-94ddf0286df2?auto=format&fit=crop&w=400&q=80",
    ),
];
